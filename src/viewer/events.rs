//! Input vocabulary shared by the native API and the wasm facade.

/// The pane a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Body,
    ColumnHeader,
    RowHeader,
    VerticalScrollbar,
    HorizontalScrollbar,
}

impl Pane {
    /// Parse the pane names used by the JavaScript host.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "body" => Some(Self::Body),
            "columnHeader" | "top" => Some(Self::ColumnHeader),
            "rowHeader" | "side" => Some(Self::RowHeader),
            "verticalScrollbar" => Some(Self::VerticalScrollbar),
            "horizontalScrollbar" => Some(Self::HorizontalScrollbar),
            _ => None,
        }
    }
}

/// What a key press asks the grid to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Copy,
    Paste,
    DeleteRow,
    CommitEdit,
    CancelEdit,
}

/// Map a `KeyboardEvent.key` plus modifier state to a command.
///
/// `command` is Ctrl on most platforms and Cmd on macOS.
pub fn key_command(key: &str, command: bool) -> Option<KeyCommand> {
    match key {
        "c" | "C" if command => Some(KeyCommand::Copy),
        "v" | "V" if command => Some(KeyCommand::Paste),
        "Delete" => Some(KeyCommand::DeleteRow),
        "Enter" => Some(KeyCommand::CommitEdit),
        "Escape" => Some(KeyCommand::CancelEdit),
        _ => None,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("c", true, Some(KeyCommand::Copy))]
    #[test_case("C", true, Some(KeyCommand::Copy))]
    #[test_case("c", false, None)]
    #[test_case("v", true, Some(KeyCommand::Paste))]
    #[test_case("Delete", false, Some(KeyCommand::DeleteRow))]
    #[test_case("Enter", false, Some(KeyCommand::CommitEdit))]
    #[test_case("Escape", true, Some(KeyCommand::CancelEdit))]
    #[test_case("x", true, None)]
    fn maps_keys(key: &str, command: bool, expected: Option<KeyCommand>) {
        assert_eq!(key_command(key, command), expected);
    }

    #[test]
    fn pane_names() {
        assert_eq!(Pane::from_name("top"), Some(Pane::ColumnHeader));
        assert_eq!(Pane::from_name("rowHeader"), Some(Pane::RowHeader));
        assert_eq!(Pane::from_name("corner"), None);
    }
}
