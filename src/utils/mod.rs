pub mod collection_ext;
pub mod error;
pub mod extract;
pub mod id_generator;
pub mod string_ext;

pub use collection_ext::{is_permutation, unique_ordered, vec_to_map};
pub use error::{ApiError, ApiResult};
pub use extract::{AppJson, AppQuery};
pub use id_generator::IdGenerator;
pub use string_ext::{StringExt, clean_list, contains_ignore_case};
