pub mod records;
pub mod system;
pub mod tree;
pub mod tree_manager;

pub use records::{present_node, present_node_list, present_note_list, present_prompt_detail};
pub use system::{present_health, present_init, present_mutation};
pub use tree::present_tree;
pub use tree_manager::{present_export, present_import, present_save_list};
