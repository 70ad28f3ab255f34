//! Shared fixtures for unit tests.
//!
//! Type tables:
//!
//! ```text
//! BaseService      : Counter
//!   └─ HelloService: Greeter, Closeable
//! PlainService     : Pinger
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::{json, Value};
use thiserror::Error;

use crate::capability::{Capability, Method, TypeInfo};
use crate::plugin::{Interceptor, Invocation, Signature};
use crate::target::{arg, Target, TargetError};

// ---------------------------------------------------------------------------
// Capabilities and types
// ---------------------------------------------------------------------------

static GREETER: Lazy<Capability> = Lazy::new(|| {
    Capability::builder("Greeter")
        .method("greet", ["String"])
        .method("farewell", ["String"])
        .build()
});

static COUNTER: Lazy<Capability> =
    Lazy::new(|| Capability::builder("Counter").method("count", Vec::<String>::new()).build());

static CLOSEABLE: Lazy<Capability> =
    Lazy::new(|| Capability::builder("Closeable").method("close", Vec::<String>::new()).build());

static PINGER: Lazy<Capability> =
    Lazy::new(|| Capability::builder("Pinger").method("ping", Vec::<String>::new()).build());

static BASE_SERVICE: Lazy<Arc<TypeInfo>> =
    Lazy::new(|| Arc::new(TypeInfo::new("BaseService").with_interface(counter())));

static HELLO_SERVICE: Lazy<TypeInfo> = Lazy::new(|| {
    TypeInfo::new("HelloService")
        .with_interface(greeter())
        .with_interface(closeable())
        .with_parent(Arc::clone(&BASE_SERVICE))
});

static PLAIN_SERVICE: Lazy<TypeInfo> =
    Lazy::new(|| TypeInfo::new("PlainService").with_interface(Capability::clone(&PINGER)));

pub fn greeter() -> Capability {
    Capability::clone(&GREETER)
}

pub fn counter() -> Capability {
    Capability::clone(&COUNTER)
}

pub fn closeable() -> Capability {
    Capability::clone(&CLOSEABLE)
}

fn lookup(capability: &Capability, name: &str, params: &[&str]) -> Method {
    capability
        .method(name, params)
        .unwrap_or_else(|| panic!("fixture method {name} missing on {capability}"))
}

pub fn greet_method() -> Method {
    lookup(&GREETER, "greet", &["String"])
}

pub fn farewell_method() -> Method {
    lookup(&GREETER, "farewell", &["String"])
}

pub fn count_method() -> Method {
    lookup(&COUNTER, "count", &[])
}

pub fn close_method() -> Method {
    lookup(&CLOSEABLE, "close", &[])
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("name must not be empty")]
    EmptyName,
}

/// Stateless greeter: `greet`, `farewell`, `count` (always 42) and `close`.
#[derive(Debug, Default)]
pub struct HelloService;

impl HelloService {
    pub fn new() -> Self {
        Self
    }
}

impl Target for HelloService {
    fn type_info(&self) -> &TypeInfo {
        &HELLO_SERVICE
    }

    fn invoke(&self, method: &Method, args: &[Value]) -> anyhow::Result<Value> {
        match (method.declaring(), method.name()) {
            ("Greeter", "greet") => {
                let name: String = arg(args, 0, method)?;
                if name.is_empty() {
                    return Err(ServiceError::EmptyName.into());
                }
                Ok(json!(format!("Hello, {name}")))
            }
            ("Greeter", "farewell") => {
                let name: String = arg(args, 0, method)?;
                Ok(json!(format!("Goodbye, {name}")))
            }
            ("Counter", "count") => Ok(json!(42)),
            ("Closeable", "close") => Ok(Value::Null),
            _ => Err(TargetError::unsupported(method, self.type_info()).into()),
        }
    }
}

/// Implements nothing any fixture interceptor registers.
#[derive(Debug)]
pub struct PlainService;

impl Target for PlainService {
    fn type_info(&self) -> &TypeInfo {
        &PLAIN_SERVICE
    }

    fn invoke(&self, method: &Method, _args: &[Value]) -> anyhow::Result<Value> {
        match method.name() {
            "ping" => Ok(json!("pong")),
            _ => Err(TargetError::unsupported(method, self.type_info()).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Interceptors
// ---------------------------------------------------------------------------

/// Thread-safe record of which interceptor saw which call.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

/// Records `tag:method`, then prefixes string results with `[tag] `.
///
/// With `short_circuit` set it returns that value without proceeding.
#[derive(Debug)]
pub struct Tagging {
    tag: String,
    signatures: Vec<Signature>,
    journal: Journal,
    short_circuit: Option<Value>,
}

impl Tagging {
    pub fn new(tag: &str, journal: &Journal) -> Self {
        Self {
            tag: tag.to_string(),
            signatures: Vec::new(),
            journal: journal.clone(),
            short_circuit: None,
        }
    }

    pub fn intercepting(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn short_circuit(mut self, value: impl Into<Value>) -> Self {
        self.short_circuit = Some(value.into());
        self
    }
}

impl Interceptor for Tagging {
    fn signatures(&self) -> Vec<Signature> {
        self.signatures.clone()
    }

    fn intercept(&self, invocation: &Invocation<'_>) -> anyhow::Result<Value> {
        self.journal
            .record(format!("{}:{}", self.tag, invocation.method().name()));
        if let Some(value) = &self.short_circuit {
            return Ok(value.clone());
        }
        let result = invocation.proceed()?;
        if let Some(s) = result.as_str() {
            return Ok(json!(format!("[{}] {}", self.tag, s)));
        }
        Ok(result)
    }
}
