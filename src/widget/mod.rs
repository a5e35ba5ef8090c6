use crate::declare::Trend;

pub mod terminal;

/// Host surface that owns the on-screen real estate and hands out display
/// items. The monitor is the only caller.
pub trait DisplayHost {
    type Item: DisplayItem;

    /// Creates a hidden item; a higher priority renders more prominently.
    fn create(&mut self, priority: i32) -> Self::Item;
}

/// One on-screen widget showing a single symbol's price.
pub trait DisplayItem {
    fn set_text(&mut self, text: &str);

    /// `None` clears any color override.
    fn set_color(&mut self, trend: Option<Trend>);

    fn show(&mut self);

    fn hide(&mut self);

    /// Releases the underlying host resource; the item must not be touched
    /// afterwards.
    fn dispose(&mut self);
}
