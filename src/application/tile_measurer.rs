// Reference tile measuring port
use crate::domain::layout::TileSize;
use crate::domain::series::{DisplayCollection, WidgetKind};

pub trait TileMeasurer: Send + Sync {
    /// Natural, unscaled size of the largest tile `series` renders into.
    /// A zero size means "not measurable yet".
    fn measure(&self, kind: WidgetKind, series: &DisplayCollection) -> TileSize;
}
