use super::{DrawCmd, SortKey, ZIndex};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw commands recorded for one frame.
///
/// Cleared and refilled every frame; capacity is kept.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted.clear();
        self.next_order = 0;
        self.sorted_dirty = false;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey { z, order: self.next_order };
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd });
        self.sorted_dirty = true;
    }

    /// Items back to front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted.clear();
            self.sorted.extend(0..self.items.len());
            let items = &self.items;
            self.sorted.sort_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }
        self.sorted.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn tags(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|it| match &it.cmd {
                DrawCmd::Rect(r) => r.rect.origin.x,
                DrawCmd::Text(_) => -1.0,
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(2), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.push_rect(ZIndex(1), Rect::new(1.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.push_rect(ZIndex(1), Rect::new(2.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(tags(&mut list), vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(0), Rect::new(5.0, 0.0, 1.0, 1.0), Color::BLACK);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(tags(&mut list), Vec::<f32>::new());

        list.push_rect(ZIndex(0), Rect::new(7.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert_eq!(list.items()[0].key.order, 0);
    }

    #[test]
    fn pushing_after_iteration_resorts() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(5), Rect::new(1.0, 0.0, 1.0, 1.0), Color::WHITE);
        let _ = tags(&mut list);
        list.push_rect(ZIndex(0), Rect::new(2.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(tags(&mut list), vec![2.0, 1.0]);
    }
}
