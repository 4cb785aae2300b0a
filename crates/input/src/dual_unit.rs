use serde::{Deserialize, Serialize};

use tilestock_quantity::{PiecesPerBox, QuantityValue, RawQuantity, from_boxes_entry, from_pieces_entry, parse_entry};

/// Unit the user is typing in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    #[default]
    Boxes,
    Pieces,
}

impl UnitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitMode::Boxes => "boxes",
            UnitMode::Pieces => "pieces",
        }
    }
}

impl core::str::FromStr for UnitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boxes" | "box" | "bx" => Ok(UnitMode::Boxes),
            "pieces" | "piece" | "pc" => Ok(UnitMode::Pieces),
            other => Err(format!("unknown unit mode: {other}")),
        }
    }
}

/// Raw text held by the input.
///
/// There is a single text slot tagged with its unit, so switching units cannot
/// leave stale text behind for the other one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// Nothing typed yet in the selected unit.
    Empty(UnitMode),
    EnteringBoxes(String),
    EnteringPieces(String),
}

impl EntryState {
    fn with_raw(mode: UnitMode, raw: String) -> Self {
        if raw.is_empty() {
            return EntryState::Empty(mode);
        }
        match mode {
            UnitMode::Boxes => EntryState::EnteringBoxes(raw),
            UnitMode::Pieces => EntryState::EnteringPieces(raw),
        }
    }

    pub fn mode(&self) -> UnitMode {
        match self {
            EntryState::Empty(mode) => *mode,
            EntryState::EnteringBoxes(_) => UnitMode::Boxes,
            EntryState::EnteringPieces(_) => UnitMode::Pieces,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            EntryState::Empty(_) => "",
            EntryState::EnteringBoxes(raw) | EntryState::EnteringPieces(raw) => raw,
        }
    }
}

/// What the input hands to its owner: a normalized quantity plus the unit the user
/// last typed in.
///
/// Serializes as `{"type": "pieces", "boxes": 2, "pieces": 1, "totalPieces": 13}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityEntry {
    #[serde(rename = "type")]
    mode: UnitMode,
    #[serde(flatten)]
    value: QuantityValue,
}

impl QuantityEntry {
    pub fn new(mode: UnitMode, value: QuantityValue) -> Self {
        Self { mode, value }
    }

    pub fn mode(&self) -> UnitMode {
        self.mode
    }

    pub fn value(&self) -> QuantityValue {
        self.value
    }

    pub fn boxes(&self) -> u64 {
        self.value.boxes()
    }

    pub fn pieces(&self) -> u64 {
        self.value.pieces()
    }

    pub fn total_pieces(&self) -> u64 {
        self.value.total_pieces()
    }

    /// `{boxes, pieces}` request body form.
    pub fn to_raw(&self) -> RawQuantity {
        self.value.to_raw()
    }
}

/// Configuration supplied by the owning form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProps {
    pub pieces_per_box: PiecesPerBox,
    /// Pre-filled total piece count (e.g. when editing an existing line).
    pub initial_value: Option<u64>,
    pub initial_mode: UnitMode,
    /// Advisory only; shown as a hint, never enforced.
    pub max_boxes: Option<u64>,
    /// Advisory only; shown as a hint, never enforced.
    pub max_pieces: Option<u64>,
}

impl InputProps {
    pub fn new(pieces_per_box: PiecesPerBox) -> Self {
        Self {
            pieces_per_box,
            initial_value: None,
            initial_mode: UnitMode::default(),
            max_boxes: None,
            max_pieces: None,
        }
    }

    pub fn with_mode(mut self, mode: UnitMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_initial_value(mut self, total_pieces: u64) -> Self {
        self.initial_value = Some(total_pieces);
        self
    }

    pub fn with_caps(mut self, max_boxes: Option<u64>, max_pieces: Option<u64>) -> Self {
        self.max_boxes = max_boxes;
        self.max_pieces = max_pieces;
        self
    }
}

/// Render snapshot for the widget layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputView {
    pub mode: UnitMode,
    pub raw: String,
    pub preview: Option<String>,
    pub cap_hint: Option<String>,
    pub exceeds_cap: bool,
}

type ChangeCallback = Box<dyn FnMut(Option<QuantityEntry>)>;
type TypeChangeCallback = Box<dyn FnMut(UnitMode)>;

/// Quantity field that accepts either boxes or pieces.
///
/// - `select_mode` switches units and discards whatever was typed
/// - `edit` replaces the text; valid text emits `Some(entry)`, anything else `None`
/// - `set_value` lets the owner push a canonical value without being notified back
pub struct DualUnitInput {
    per_box: PiecesPerBox,
    state: EntryState,
    value: Option<QuantityEntry>,
    max_boxes: Option<u64>,
    max_pieces: Option<u64>,
    on_change: Option<ChangeCallback>,
    on_type_change: Option<TypeChangeCallback>,
}

impl core::fmt::Debug for DualUnitInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DualUnitInput")
            .field("per_box", &self.per_box)
            .field("state", &self.state)
            .field("value", &self.value)
            .field("max_boxes", &self.max_boxes)
            .field("max_pieces", &self.max_pieces)
            .finish_non_exhaustive()
    }
}

impl DualUnitInput {
    pub fn new(props: InputProps) -> Self {
        let mut input = Self {
            per_box: props.pieces_per_box,
            state: EntryState::Empty(props.initial_mode),
            value: None,
            max_boxes: props.max_boxes,
            max_pieces: props.max_pieces,
            on_change: None,
            on_type_change: None,
        };
        input.set_value(props.initial_value);
        input
    }

    pub fn on_change(mut self, callback: impl FnMut(Option<QuantityEntry>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_type_change(mut self, callback: impl FnMut(UnitMode) + 'static) -> Self {
        self.on_type_change = Some(Box::new(callback));
        self
    }

    pub fn pieces_per_box(&self) -> PiecesPerBox {
        self.per_box
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn mode(&self) -> UnitMode {
        self.state.mode()
    }

    pub fn raw(&self) -> &str {
        self.state.raw()
    }

    /// Last valid quantity, if any.
    pub fn value(&self) -> Option<QuantityEntry> {
        self.value
    }

    pub fn preview(&self) -> Option<String> {
        self.value.map(|entry| entry.value().preview())
    }

    /// Switch units. Selecting the active unit does nothing.
    pub fn select_mode(&mut self, mode: UnitMode) {
        if self.mode() == mode {
            return;
        }
        tracing::debug!(from = self.mode().as_str(), to = mode.as_str(), "quantity unit switched");

        self.state = EntryState::Empty(mode);
        if let Some(callback) = self.on_type_change.as_mut() {
            callback(mode);
        }
        if self.value.take().is_some() {
            self.emit(None);
        }
    }

    /// Replace the text of the active unit and notify the owner.
    ///
    /// Unusable text (empty, zero, negative, non-numeric) is kept in the field but
    /// counts as "no quantity".
    pub fn edit(&mut self, raw: impl Into<String>) {
        let mode = self.mode();
        self.state = EntryState::with_raw(mode, raw.into());

        let parsed = parse_entry(self.state.raw()).and_then(|n| match mode {
            UnitMode::Boxes => from_boxes_entry(n, self.per_box),
            UnitMode::Pieces => Ok(from_pieces_entry(n, self.per_box)),
        });
        self.value = match parsed {
            Ok(value) => Some(QuantityEntry::new(mode, value)),
            Err(reason) => {
                tracing::debug!(raw = self.state.raw(), %reason, "quantity entry treated as empty");
                None
            }
        };
        self.emit(self.value);
    }

    /// Push a canonical total piece count from the owner.
    ///
    /// The text is re-derived for the active unit: whole boxes in boxes mode, the
    /// total in pieces mode. The exact value is kept either way so the preview
    /// stays accurate. `on_change` is not called.
    pub fn set_value(&mut self, total_pieces: Option<u64>) {
        let mode = self.mode();
        match total_pieces.filter(|&t| t > 0) {
            None => {
                self.state = EntryState::Empty(mode);
                self.value = None;
            }
            Some(total) => {
                let value = from_pieces_entry(total, self.per_box);
                let raw = match mode {
                    UnitMode::Boxes => value.boxes(),
                    UnitMode::Pieces => value.total_pieces(),
                };
                self.state = EntryState::with_raw(mode, raw.to_string());
                self.value = Some(QuantityEntry::new(mode, value));
            }
        }
    }

    /// Reset to an empty field in the active unit (e.g. after a successful submit).
    pub fn clear(&mut self) {
        self.state = EntryState::Empty(self.mode());
        if self.value.take().is_some() {
            self.emit(None);
        }
    }

    pub fn cap_hint(&self) -> Option<String> {
        match self.mode() {
            UnitMode::Boxes => self.max_boxes.map(|max| format!("max {max} bx")),
            UnitMode::Pieces => self.max_pieces.map(|max| format!("max {max} pc")),
        }
    }

    /// Whether the current value is above any advisory cap.
    pub fn exceeds_cap(&self) -> bool {
        let Some(entry) = self.value else {
            return false;
        };
        let over_boxes = self
            .max_boxes
            .is_some_and(|max| entry.total_pieces() > max.saturating_mul(u64::from(self.per_box.get())));
        let over_pieces = self.max_pieces.is_some_and(|max| entry.total_pieces() > max);
        over_boxes || over_pieces
    }

    pub fn view(&self) -> InputView {
        InputView {
            mode: self.mode(),
            raw: self.raw().to_string(),
            preview: self.preview(),
            cap_hint: self.cap_hint(),
            exceeds_cap: self.exceeds_cap(),
        }
    }

    fn emit(&mut self, value: Option<QuantityEntry>) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn per_box(n: u32) -> PiecesPerBox {
        PiecesPerBox::new(n).unwrap()
    }

    type Changes = Rc<RefCell<Vec<Option<QuantityEntry>>>>;
    type Modes = Rc<RefCell<Vec<UnitMode>>>;

    fn recording_input(props: InputProps) -> (DualUnitInput, Changes, Modes) {
        let changes: Changes = Rc::default();
        let modes: Modes = Rc::default();
        let (c, m) = (changes.clone(), modes.clone());
        let input = DualUnitInput::new(props)
            .on_change(move |v| c.borrow_mut().push(v))
            .on_type_change(move |mode| m.borrow_mut().push(mode));
        (input, changes, modes)
    }

    #[test]
    fn pieces_entry_emits_normalized_value() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(6)).with_mode(UnitMode::Pieces));

        input.edit("13");

        let emitted = changes.borrow().last().copied().flatten().unwrap();
        assert_eq!(emitted.mode(), UnitMode::Pieces);
        assert_eq!((emitted.boxes(), emitted.pieces(), emitted.total_pieces()), (2, 1, 13));
        assert!(input.preview().unwrap().contains("2 bx, 1 pc"));
    }

    #[test]
    fn boxes_entry_emits_whole_boxes() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(4)));

        input.edit("3");

        let emitted = changes.borrow().last().copied().flatten().unwrap();
        assert_eq!(emitted.mode(), UnitMode::Boxes);
        assert_eq!((emitted.boxes(), emitted.pieces(), emitted.total_pieces()), (3, 0, 12));
    }

    #[test]
    fn emitted_entry_serializes_with_type_tag() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(6)).with_mode(UnitMode::Pieces));
        input.edit("13");

        let emitted = changes.borrow().last().copied().flatten().unwrap();
        let json = serde_json::to_value(emitted).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "pieces", "boxes": 2, "pieces": 1, "totalPieces": 13})
        );
    }

    #[test]
    fn zero_and_empty_emit_none_in_both_modes() {
        for mode in [UnitMode::Boxes, UnitMode::Pieces] {
            let (mut input, changes, _) = recording_input(InputProps::new(per_box(6)).with_mode(mode));

            input.edit("0");
            input.edit("");

            assert_eq!(*changes.borrow(), vec![None, None]);
            assert_eq!(input.preview(), None);
        }
    }

    #[test]
    fn invalid_text_is_kept_but_counts_as_empty() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(6)));

        input.edit("-2");

        assert_eq!(input.raw(), "-2");
        assert_eq!(input.value(), None);
        assert_eq!(*changes.borrow(), vec![None]);
    }

    #[test]
    fn box_count_too_large_for_piece_total_counts_as_empty() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(2)));

        input.edit("9223372036854775808");

        assert_eq!(input.raw(), "9223372036854775808");
        assert_eq!(input.value(), None);
        assert_eq!(*changes.borrow(), vec![None]);

        input.edit("9223372036854775807");
        let entry = input.value().unwrap();
        assert_eq!((entry.boxes(), entry.pieces()), (9_223_372_036_854_775_807, 0));
    }

    #[test]
    fn typing_through_a_leading_zero_recovers() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(6)));

        input.edit("0");
        input.edit("05");

        let changes = changes.borrow();
        assert_eq!(changes[0], None);
        assert_eq!(changes[1].unwrap().boxes(), 5);
    }

    #[test]
    fn mode_switch_clears_stale_text() {
        let (mut input, changes, modes) = recording_input(InputProps::new(per_box(6)));

        input.edit("5");
        input.select_mode(UnitMode::Pieces);

        assert_eq!(input.state(), &EntryState::Empty(UnitMode::Pieces));
        assert_eq!(input.raw(), "");
        assert_eq!(input.preview(), None);
        assert_eq!(*modes.borrow(), vec![UnitMode::Pieces]);
        assert_eq!(changes.borrow().last().copied(), Some(None));
    }

    #[test]
    fn selecting_active_mode_is_noop() {
        let (mut input, changes, modes) = recording_input(InputProps::new(per_box(6)));

        input.edit("5");
        input.select_mode(UnitMode::Boxes);

        assert_eq!(input.raw(), "5");
        assert!(modes.borrow().is_empty());
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn switching_an_empty_field_does_not_emit_change() {
        let (mut input, changes, modes) = recording_input(InputProps::new(per_box(6)));

        input.select_mode(UnitMode::Pieces);

        assert!(changes.borrow().is_empty());
        assert_eq!(*modes.borrow(), vec![UnitMode::Pieces]);
    }

    #[test]
    fn pushed_value_rederives_text_for_active_mode() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(6)).with_mode(UnitMode::Pieces));

        input.set_value(Some(13));
        assert_eq!(input.raw(), "13");

        input.select_mode(UnitMode::Boxes);
        input.set_value(Some(13));
        assert_eq!(input.raw(), "2");
        assert_eq!(input.value().unwrap().total_pieces(), 13);
        assert_eq!(input.preview().as_deref(), Some("2 bx, 1 pc (total 13 pieces)"));

        // only the mode switch away from the pushed value notified the owner
        assert_eq!(*changes.borrow(), vec![None]);
    }

    #[test]
    fn initial_value_prefills_without_notifying() {
        let (input, changes, _) = recording_input(InputProps::new(per_box(4)).with_initial_value(12));

        assert_eq!(input.raw(), "3");
        assert_eq!(input.value().unwrap().boxes(), 3);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn clear_resets_and_notifies_once() {
        let (mut input, changes, _) = recording_input(InputProps::new(per_box(4)));

        input.edit("2");
        input.clear();
        input.clear();

        assert_eq!(input.state(), &EntryState::Empty(UnitMode::Boxes));
        assert_eq!(changes.borrow().len(), 2);
    }

    #[test]
    fn caps_are_advisory() {
        let props = InputProps::new(per_box(4)).with_caps(Some(2), Some(10));
        let (mut input, changes, _) = recording_input(props);

        input.edit("3");

        assert!(input.exceeds_cap());
        assert_eq!(input.cap_hint().as_deref(), Some("max 2 bx"));
        // still emitted
        assert_eq!(changes.borrow().last().copied().flatten().unwrap().boxes(), 3);

        let view = input.view();
        assert!(view.exceeds_cap);
        assert_eq!(view.raw, "3");
    }

    #[test]
    fn unit_mode_parses_aliases() {
        assert_eq!("Pieces".parse::<UnitMode>(), Ok(UnitMode::Pieces));
        assert_eq!("bx".parse::<UnitMode>(), Ok(UnitMode::Boxes));
        assert!("crates".parse::<UnitMode>().is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the held value is present exactly when the text parses,
            /// and is always normalized for the input's pieces-per-box.
            #[test]
            fn value_tracks_text(
                p in 1u32..=12,
                edits in proptest::collection::vec(("[0-9]{0,4}|-?[0-9a-z.]{0,3}", any::<bool>()), 1..20)
            ) {
                let mut input = DualUnitInput::new(InputProps::new(per_box(p)));
                for (text, pieces_mode) in edits {
                    input.select_mode(if pieces_mode { UnitMode::Pieces } else { UnitMode::Boxes });
                    input.edit(text.clone());

                    let parsed = parse_entry(&text);
                    prop_assert_eq!(input.value().is_some(), parsed.is_ok());
                    if let Some(entry) = input.value() {
                        prop_assert!(entry.pieces() < u64::from(p));
                        prop_assert_eq!(entry.mode(), input.mode());
                    }
                }
            }
        }
    }
}
