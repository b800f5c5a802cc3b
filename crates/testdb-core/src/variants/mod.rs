//! Backend variants implementing [`DatabaseHandle`](crate::handle::DatabaseHandle)

mod containerized;
mod file_embedded;
mod standalone;

pub use containerized::ContainerizedDb;
pub use file_embedded::FileEmbeddedDb;
pub use standalone::StandaloneDb;
