pub mod assembler;
pub mod augment;
pub mod domain;
pub mod extract;
pub mod knowledge;
pub mod logging;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod sections;
pub mod validation;
pub mod validators;

pub use assembler::{assemble_template_only, AssemblyContext, Assembler};
pub use domain::{InputRecord, OutputDocument};
pub use validation::ValidationResult;
pub use validators::{validate_input, validate_output};
