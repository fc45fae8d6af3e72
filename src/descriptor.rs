mod arg_spec;
mod arg_type;
mod declaration;
mod descriptor_error;
mod method_descriptor;
mod path_template;
mod return_spec;

pub use arg_spec::*;
pub use arg_type::*;
pub use declaration::*;
pub use descriptor_error::*;
pub use method_descriptor::*;
pub use path_template::*;
pub use return_spec::*;
