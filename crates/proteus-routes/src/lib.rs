//! # Proteus Routes
//!
//! Route table generation from presenter discovery, with a caching
//! decorator.
//!
//! [`PresenterRouteListFactory`] turns discovered presenter names into an
//! ordered [`RouteTable`]; [`CachedRouteListFactory`] wraps any factory and
//! serves serialized tables from a [`RouteCache`], keyed on the discovery
//! scope plus the source's modification signature so tables rebuild exactly
//! when the presenter set changes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod discovery;
mod error;
mod factory;
mod route;

pub use cache::{MemoryRouteCache, RouteCache};
pub use discovery::{FilesystemDiscovery, PresenterDiscovery};
pub use error::{RouteError, RouteResult};
pub use factory::{CachedRouteListFactory, PresenterRouteListFactory, RouteListFactory};
pub use route::{RouteDefinition, RouteTable};
