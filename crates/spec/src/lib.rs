//! OpenAPI v3 document loading and normalization
//!
//! Turns an OpenAPI v3 document annotated with a function-binding extension
//! into an [`ApiSpec`]: the ordered path table with path-level parameters and
//! one [`OperationSpec`] per declared HTTP method.

pub mod error;
pub mod loader;
pub mod normalizer;
pub mod resolver;
pub mod types;

pub use error::{SpecError, SpecResult};
pub use loader::{
    load_document, parse_document, DocumentFormat, DocumentLoader, FileDocumentLoader,
    OpenApiDocument,
};
pub use normalizer::{api_spec_from, try_api_spec_from, SpecNormalizer, EXT_PROP_LAMBDA};
pub use types::{
    ApiSpec, HttpMethod, LambdaSpec, MediaTypeSpec, OperationSpec, ParameterLocation,
    ParameterSpec, PathSpec, RequestBodySpec,
};
