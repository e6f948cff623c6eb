pub mod session;

pub use session::{CalculatorSession, SessionError};
