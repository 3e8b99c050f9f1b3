//! Pipeline assembly.
//!
//! [`ProteusBuilder`] turns a validated [`ProteusConfig`] plus optional
//! collaborators (credential store, token validator, route cache, presenter
//! discovery) into an assembled [`Proteus`] instance. Assembly happens once
//! at start-up; every failure here is fatal and the service must not serve
//! traffic.

use crate::{AuthDiagnostics, DiagnosticsSnapshot, OutputFlags, RequestFilter};
use proteus_config::{ConfigError, ProteusConfig};
use proteus_convert::{Converter, ConverterKind, ConverterPipeline, DateTimeConverter, ObjectConverter};
use proteus_core::{ApiRequest, ErrorKind, ProteusError, ProteusResult, Resource};
use proteus_mapping::{content_type, JsonMapper, Mapper, MapperRegistry, MappingError};
use proteus_routes::{
    CachedRouteListFactory, FilesystemDiscovery, MemoryRouteCache, PresenterDiscovery,
    PresenterRouteListFactory, RouteCache, RouteListFactory, RouteTable,
};
use proteus_security::{
    AuthenticationContext, BasicAuthentication, CredentialStore, HashAuthenticator,
    OAuth2Authentication, SecuredAuthentication, TimeoutAuthenticator, TokenValidator,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during assembly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// Two key-casing converters ended up registered.
    #[error("conflicting key-casing converters: '{first}' and '{second}'")]
    ConflictingCasingConverters {
        /// The casing converter registered first.
        first: String,
        /// The conflicting second registration.
        second: String,
    },

    /// `security.require_oauth2` is set but no token validator was supplied.
    #[error("security.require_oauth2 is set but no token validator was supplied")]
    MissingOAuth2Validator,

    /// The configuration itself is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A mapper registration collided.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl From<BuildError> for ProteusError {
    fn from(err: BuildError) -> Self {
        Self::new(ErrorKind::Configuration, err.to_string())
    }
}

/// Builder collecting configuration and collaborators for [`Proteus`].
#[derive(Default)]
pub struct ProteusBuilder {
    config: ProteusConfig,
    converters: Vec<Arc<dyn Converter>>,
    mappers: Vec<(String, Arc<dyn Mapper>)>,
    credential_store: Option<Arc<dyn CredentialStore>>,
    token_validator: Option<Arc<dyn TokenValidator>>,
    route_cache: Option<Arc<dyn RouteCache>>,
    discovery: Option<Arc<dyn PresenterDiscovery>>,
}

impl ProteusBuilder {
    /// Starts a builder from configuration.
    #[must_use]
    pub fn new(config: ProteusConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Appends an application converter after the built-in ones.
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Registers an additional mapper under the given content-type key.
    #[must_use]
    pub fn with_mapper(mut self, key: impl Into<String>, mapper: Arc<dyn Mapper>) -> Self {
        self.mappers.push((key.into(), mapper));
        self
    }

    /// Supplies the credential store enabling basic authentication.
    #[must_use]
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Supplies the token validator enabling OAuth2 authentication.
    #[must_use]
    pub fn with_token_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.token_validator = Some(validator);
        self
    }

    /// Replaces the in-memory route cache.
    #[must_use]
    pub fn with_route_cache(mut self, cache: Arc<dyn RouteCache>) -> Self {
        self.route_cache = Some(cache);
        self
    }

    /// Replaces filesystem presenter discovery.
    #[must_use]
    pub fn with_discovery(mut self, discovery: Arc<dyn PresenterDiscovery>) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// Assembles the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the configuration fails validation, two
    /// key-casing converters collide, a mapper key collides, or OAuth2 is
    /// required without a validator.
    pub fn build(self) -> Result<Proteus, BuildError> {
        self.config.validate()?;

        let pipeline = self.build_pipeline()?;
        let registry = self.build_registry()?;
        let context = self.build_context()?;
        let route_factory = self.build_route_factory();
        let filter = RequestFilter::new(&self.config.jsonp_key, &self.config.pretty_print_key);

        tracing::info!(
            converters = ?pipeline.converter_names(),
            content_types = ?registry.content_types(),
            process = context.process_name(),
            routes = route_factory.is_some(),
            "proteus assembled"
        );

        Ok(Proteus {
            config: self.config,
            pipeline,
            registry,
            context,
            route_factory,
            filter,
        })
    }

    fn build_pipeline(&self) -> Result<ConverterPipeline, BuildError> {
        let mut pipeline = ConverterPipeline::new();
        pipeline.add_converter(ObjectConverter);
        pipeline.add_converter(DateTimeConverter::new(&self.config.time_format));

        let mut casing: Option<String> = None;
        let mut track = |name: &str| match &casing {
            Some(first) => Err(BuildError::ConflictingCasingConverters {
                first: first.clone(),
                second: name.to_string(),
            }),
            None => {
                casing = Some(name.to_string());
                Ok(())
            }
        };

        if let Some(converter) = self.config.convention.converter() {
            track(converter.name())?;
            pipeline.add_shared(converter);
        }
        for converter in &self.converters {
            if converter.kind() == ConverterKind::KeyCasing {
                track(converter.name())?;
            }
            pipeline.add_shared(Arc::clone(converter));
        }
        Ok(pipeline)
    }

    fn build_registry(&self) -> Result<MapperRegistry, BuildError> {
        let mut registry = MapperRegistry::with_defaults();
        for (key, mapper) in &self.mappers {
            registry.register_as(key.clone(), Arc::clone(mapper))?;
        }
        Ok(registry)
    }

    fn build_context(&self) -> Result<AuthenticationContext, BuildError> {
        if self.config.security.require_oauth2 && self.token_validator.is_none() {
            return Err(BuildError::MissingOAuth2Validator);
        }

        let mut chain = SecuredAuthentication::new();
        let mut any = false;
        if let Some(private_key) = &self.config.security.private_key {
            chain = chain
                .with_process(TimeoutAuthenticator::new(
                    &self.config.security.request_time_key,
                    self.config.security.request_timeout_secs,
                ))
                .with_process(HashAuthenticator::new(private_key.clone()));
            any = true;
        }
        if let Some(store) = &self.credential_store {
            chain = chain.with_process(BasicAuthentication::new(Arc::clone(store)));
            any = true;
        }
        if let Some(validator) = &self.token_validator {
            chain = chain.with_process(OAuth2Authentication::new(Arc::clone(validator)));
            any = true;
        }

        let mut context = AuthenticationContext::new();
        if any {
            context.set_process(chain);
        }
        Ok(context)
    }

    fn build_route_factory(&self) -> Option<Arc<dyn RouteListFactory>> {
        if !self.config.routes.auto_generated {
            return None;
        }
        let (discovery, scope_root) = match (&self.discovery, &self.config.routes.presenters_root)
        {
            (Some(discovery), root) => (
                Arc::clone(discovery),
                root.as_ref()
                    .map_or_else(|| "external".to_string(), |p| p.display().to_string()),
            ),
            (None, Some(root)) => (
                Arc::new(FilesystemDiscovery::new(root)) as Arc<dyn PresenterDiscovery>,
                root.display().to_string(),
            ),
            (None, None) => return None,
        };

        let module = self.config.routes.module.clone();
        let prefix = self.config.routes.prefix.clone();
        let scope = format!(
            "{scope_root}|{}|{}",
            module.as_deref().unwrap_or_default(),
            prefix.as_deref().unwrap_or_default()
        );
        let inner = Arc::new(PresenterRouteListFactory::new(
            Arc::clone(&discovery),
            module,
            prefix,
        ));
        let cache = self
            .route_cache
            .clone()
            .unwrap_or_else(|| Arc::new(MemoryRouteCache::new()));
        Some(Arc::new(CachedRouteListFactory::new(
            inner, discovery, cache, scope,
        )))
    }
}

/// The assembled representation pipeline.
///
/// Immutable once built: concurrent requests share it read-only.
pub struct Proteus {
    config: ProteusConfig,
    pipeline: ConverterPipeline,
    registry: MapperRegistry,
    context: AuthenticationContext,
    route_factory: Option<Arc<dyn RouteListFactory>>,
    filter: RequestFilter,
}

impl Proteus {
    /// Starts a builder from configuration.
    #[must_use]
    pub fn builder(config: ProteusConfig) -> ProteusBuilder {
        ProteusBuilder::new(config)
    }

    /// The configuration this instance was assembled from.
    #[must_use]
    pub fn config(&self) -> &ProteusConfig {
        &self.config
    }

    /// The converter pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &ConverterPipeline {
        &self.pipeline
    }

    /// The mapper registry.
    #[must_use]
    pub fn registry(&self) -> &MapperRegistry {
        &self.registry
    }

    /// The authentication context.
    #[must_use]
    pub fn context(&self) -> &AuthenticationContext {
        &self.context
    }

    /// The request filter for the reserved output parameters.
    #[must_use]
    pub fn filter(&self) -> &RequestFilter {
        &self.filter
    }

    /// Authenticates a request with the active process.
    ///
    /// # Errors
    ///
    /// Returns a [`ProteusError`] carrying the denial reason.
    pub fn authenticate(&self, request: &ApiRequest) -> ProteusResult<()> {
        self.context.authenticate(request).map_err(ProteusError::from)
    }

    /// Decodes an inbound representation.
    pub fn decode(&self, content_type: &str, input: &str) -> ProteusResult<Resource> {
        self.registry
            .decode(content_type, input)
            .map_err(ProteusError::from)
    }

    /// Runs a resource through the converter pipeline and encodes it.
    ///
    /// For JSON output the [`OutputFlags`] select pretty printing and JSONP
    /// wrapping; other formats ignore them.
    pub fn render(
        &self,
        resource: Resource,
        requested: &str,
        flags: &OutputFlags,
    ) -> ProteusResult<String> {
        let converted = self.pipeline.convert(resource);
        let body = if requested == content_type::JSON && flags.pretty {
            JsonMapper::pretty().encode(&converted)?
        } else {
            self.registry.encode(requested, &converted)?
        };
        if requested == content_type::JSON {
            if let Some(callback) = &flags.jsonp_callback {
                return Ok(format!("{callback}({body});"));
            }
        }
        Ok(body)
    }

    /// Builds (or fetches from cache) the generated route table.
    ///
    /// Returns `Ok(None)` when route generation is not configured.
    pub fn route_table(&self) -> ProteusResult<Option<RouteTable>> {
        match &self.route_factory {
            Some(factory) => factory
                .create()
                .map(Some)
                .map_err(ProteusError::from),
            None => Ok(None),
        }
    }

    /// Captures a diagnostics snapshot, when `routes.panel` is enabled.
    #[must_use]
    pub fn diagnostics(&self) -> Option<DiagnosticsSnapshot> {
        if !self.config.routes.panel {
            return None;
        }
        let routes = self
            .route_factory
            .as_ref()
            .and_then(|factory| factory.create().ok());
        Some(DiagnosticsSnapshot {
            active_process: self.context.process_name().to_string(),
            last_auth: self.context.last_outcome().map(AuthDiagnostics::from),
            converters: self
                .pipeline
                .converter_names()
                .iter()
                .map(ToString::to_string)
                .collect(),
            content_types: self
                .registry
                .content_types()
                .iter()
                .map(ToString::to_string)
                .collect(),
            routes,
        })
    }
}

impl std::fmt::Debug for Proteus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proteus")
            .field("converters", &self.pipeline.converter_names())
            .field("content_types", &self.registry.content_types())
            .field("process", &self.context.process_name())
            .field("routes", &self.route_factory.is_some())
            .finish_non_exhaustive()
    }
}
