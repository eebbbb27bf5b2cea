pub mod cloud;
pub mod decoder;
pub mod error;
pub mod header;
pub mod io;
pub mod layout;
pub mod limits;
pub mod lzf;
pub mod options;
pub mod primitive;

pub use cloud::PointCloud;
pub use error::{PcdError, Result};
pub use header::{DataFormat, FieldDescriptor, PcdHeader, PrimitiveKind};
pub use io::{read_pcd, read_pcd_with_options, write_pcd};
pub use limits::Limits;
pub use options::{ReadOptions, WriteOptions};
