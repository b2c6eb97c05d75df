//! Method handlers for the pipeline
//!
//! ## Key Components
//!
//! - [`MethodHandler`] - Trait implemented once per supported method
//! - [`GetHandler`] / [`PostHandler`] - Built-in handlers
//! - [`HandlerRegistry`] - Maps methods to handler instances
//! - [`Router`] - Resolves a handler, answering 405 for unknown methods
//!
//! ## Example
//!
//! ```rust,ignore
//! use pipebox::handlers::{HandlerRegistry, HandlerSettings, Router};
//!
//! let settings = HandlerSettings::default();
//! let registry = HandlerRegistry::with_defaults(source, &settings);
//! let router = Router::new(registry, &settings, metrics);
//! let response = router.route(request).await?;
//! ```

mod methods;
mod registry;
mod traits;
mod types;

pub use methods::{GetHandler, PostHandler};
pub use registry::{HandlerRegistry, Router};
pub use traits::MethodHandler;
pub use types::{HandlerSettings, PageNames};
