use prompttree_engine::TreeRenderModel;
use serde::Serialize;
use std::fmt;

use crate::presentation::views::TreeView;

#[derive(Debug, Serialize)]
pub struct TreeViewModel {
    #[serde(flatten)]
    pub model: TreeRenderModel,
    /// Strip width the slot budget was computed for, if it was measured
    pub width: Option<u16>,
}

impl fmt::Display for TreeViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", TreeView::new(self))
    }
}
