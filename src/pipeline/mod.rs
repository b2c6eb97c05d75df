//! Request pipeline: data model, paced bodies, middleware chain and dispatcher
//!
//! Requests flow through [`Dispatcher`] into a [`Pipeline`], which runs the
//! logging and authorization layers before the router picks a method handler.
//! Responses come back in completion order with their bodies still undrained.

mod body;
mod dispatcher;
mod error;
mod middleware;
mod types;

pub use body::ResponseBody;
pub use dispatcher::{Completion, Completions, Dispatcher};
pub use error::PipelineError;
pub use middleware::{
    Authorization, Middleware, Next, Pipeline, PipelineBuilder, RequestLogging,
};
pub use types::{HeaderList, Method, Request, Response, StatusLine};
