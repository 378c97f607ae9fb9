use crate::models::HackerNewsItem;

/// Column the results table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    #[default]
    None,
    Title,
    Author,
    Comments,
    Points,
}

impl SortMode {
    /// Modes that have a clickable table header, in column order.
    pub const COLUMNS: [SortMode; 4] = [
        SortMode::Title,
        SortMode::Author,
        SortMode::Comments,
        SortMode::Points,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::None => "None",
            SortMode::Title => "Title",
            SortMode::Author => "Author",
            SortMode::Comments => "Comments",
            SortMode::Points => "Points",
        }
    }
}

/// Active sort column and whether the display order is flipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    pub mode: SortMode,
    pub reversed: bool,
}

impl SortState {
    pub fn new(mode: SortMode, reversed: bool) -> Self {
        Self { mode, reversed }
    }

    /// Clicking the active column flips direction; any other column becomes
    /// active in its natural direction.
    pub fn toggle(self, mode: SortMode) -> SortState {
        if mode == self.mode {
            SortState {
                mode,
                reversed: !self.reversed,
            }
        } else {
            SortState {
                mode,
                reversed: false,
            }
        }
    }
}

/// Orders `items` for `mode` without touching the input.
///
/// Title and author sort ascending. Comments and points are sorted ascending
/// and then reversed as a whole, so equal counts come out in reverse of their
/// input order.
pub fn sort(items: &[HackerNewsItem], mode: SortMode) -> Vec<HackerNewsItem> {
    let mut sorted = items.to_vec();
    match mode {
        SortMode::None => {}
        SortMode::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortMode::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
        SortMode::Comments => {
            sorted.sort_by_key(|item| item.comments_count);
            sorted.reverse();
        }
        SortMode::Points => {
            sorted.sort_by_key(|item| item.points);
            sorted.reverse();
        }
    }
    sorted
}

pub fn toggle_sort(state: SortState, mode: SortMode) -> SortState {
    state.toggle(mode)
}

/// Sorts for `state.mode`, then reverses the result again when
/// `state.reversed` is set. For comments and points that second reversal is
/// applied on top of the one `sort` already did.
pub fn apply_display_order(items: &[HackerNewsItem], state: SortState) -> Vec<HackerNewsItem> {
    let mut ordered = sort(items, state.mode);
    if state.reversed {
        ordered.reverse();
    }
    ordered
}
