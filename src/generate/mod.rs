mod generator;
mod template;
mod writer;

pub use generator::{Generation, Generator};
pub use template::{render_artifact, FRAMEWORK_MODULE, PROVENANCE};
pub use writer::{bootstrap_output_dir, temp_path, write_atomic};
