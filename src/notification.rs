//! # Notification
//!
//! The immutable event value broadcast through a core.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque notification payload
///
/// Bodies are shared rather than copied, so a body wrapping interior mutability
/// (a `Mutex`, an atomic) can carry state that commands accumulate into.
pub type Body = Arc<dyn Any + Send + Sync>;

/// A named event with an optional body and type tag
#[derive(Clone)]
pub struct Notification {
    name: String,
    body: Option<Body>,
    type_tag: Option<String>,
}

impl Notification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
            type_tag: None,
        }
    }

    /// Attach a body value
    pub fn with_body<T: Any + Send + Sync>(mut self, body: T) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    /// Attach an already shared body
    pub fn with_shared_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a type tag
    pub fn with_type(mut self, type_tag: impl Into<String>) -> Self {
        self.type_tag = Some(type_tag.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Downcast the body to a concrete type
    pub fn body_as<T: Any>(&self) -> Option<&T> {
        self.body.as_deref().and_then(|body| body.downcast_ref::<T>())
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("name", &self.name)
            .field("body", &self.body.as_ref().map(|_| "<opaque>"))
            .field("type_tag", &self.type_tag)
            .finish()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification Name: {}", self.name)?;
        match &self.body {
            Some(_) => write!(f, "\nBody: <opaque>")?,
            None => write!(f, "\nBody: null")?,
        }
        write!(f, "\nType: {}", self.type_tag.as_deref().unwrap_or("null"))
    }
}
