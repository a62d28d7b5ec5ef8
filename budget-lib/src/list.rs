use serde::{Deserialize, Serialize};

/// Collection response body: the items plus their count.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ItemList<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        let count = items.len();
        ItemList { items, count }
    }
}
