//! Demo MCP servers.
//!
//! Three small servers back the demo lineup: a greeting server with a
//! templated resource, a calculator, and an info server for the stdio
//! subprocess demo.

mod calculator;
mod greeting;
mod info;

pub use calculator::CalculatorServer;
pub use greeting::GreetingServer;
pub use info::InfoServer;
