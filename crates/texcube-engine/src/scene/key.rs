/// Layer of a draw item; higher is on top.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

/// Paint-order key: `z` first, then insertion `order` within a layer.
///
/// Field order matters for the derived `Ord`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_order() {
        let back = SortKey { z: ZIndex(0), order: 9 };
        let front = SortKey { z: ZIndex(1), order: 0 };
        assert!(back < front);
    }

    #[test]
    fn order_breaks_ties() {
        let a = SortKey { z: ZIndex(3), order: 1 };
        let b = SortKey { z: ZIndex(3), order: 2 };
        assert!(a < b);
    }
}
