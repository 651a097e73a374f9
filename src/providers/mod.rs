pub mod nbg;
pub mod transport;
pub mod util;

pub use nbg::RateRepository;
pub use transport::{FetchResponse, HttpTransport, Transport, TransportError};
