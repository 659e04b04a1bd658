//! Built-in vendor code tables.
//!
//! Each supported controller family is described by a [`CodeTable`]: an
//! ordered list of symbolic key names and the hex command the panel's
//! serial interface expects for that key. Byte values are reproduced
//! exactly from the vendor control documentation. Wire compatibility is
//! the entire point of these tables, so entries are never normalized,
//! deduplicated, or invented; two variants sharing a byte sequence for a
//! key is a property of the hardware, not of this crate.
//!
//! Tables are defined as factory functions (e.g. [`avermedia()`]) that
//! return a fully populated [`CodeTable`]. The following variants are
//! built in:
//!
//! | Variant   | Keys | Notes                                            |
//! |-----------|------|--------------------------------------------------|
//! | AverMedia | 34   | power, navigation, digits, input selection       |
//! | KTC       | 53   | adds status queries and Android mode switching   |
//!
//! Commands are 3 bytes for infrared-style key presses and 4 bytes for
//! input-source switching. Keys are matched exact-string; callers that
//! want case-insensitive entry normalize once at their own boundary.

/// An ordered symbolic-key to hex-command table for one controller family.
///
/// The hex strings are kept in their documented space-separated form and
/// decoded on resolution, so the stored data stays byte-for-byte
/// comparable with the vendor documentation.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Variant identifier (e.g. "AverMedia"). Case-sensitive.
    pub variant: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl CodeTable {
    /// Key names in table order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    /// Look up the hex command string for a key. Exact-string match.
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, hex)| *hex)
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, hex)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// AverMedia interactive panel code table.
///
/// The baseline table: power, mute, digit entry, menu navigation,
/// volume/channel, and input-source selection. Source switching uses the
/// 4-byte `89 ..` command family; everything else is the 3-byte `69 ..`
/// key-press family.
pub fn avermedia() -> CodeTable {
    CodeTable {
        variant: "AverMedia",
        entries: &[
            ("POWER_ON", "69 53 43"),
            ("POWER_OFF", "69 76 20"),
            ("MUTE", "69 37 5F"),
            ("1", "69 92 04"),
            ("2", "69 A2 F4"),
            ("3", "69 B2 E4"),
            ("4", "69 93 03"),
            ("5", "69 A3 F3"),
            ("6", "69 B3 E3"),
            ("7", "69 94 02"),
            ("8", "69 A4 F2"),
            ("9", "69 B4 E2"),
            ("0", "69 95 01"),
            ("MENU", "69 80 16"),
            ("LEFT", "69 63 33"),
            ("RIGHT", "69 66 30"),
            ("DOWN", "69 43 53"),
            ("UP", "69 46 50"),
            ("VOL_UP", "69 82 14"),
            ("VOL_DOWN", "69 85 11"),
            ("CH_UP", "69 C4 D2"),
            ("CH_DOWN", "69 C5 D1"),
            ("SOURCE", "69 19 7D"),
            ("ENTER", "69 07 8F"),
            ("TO_AV", "89 55 0D 14"),
            ("TO_VGA", "89 65 03 0E"),
            ("TO_YPbPr", "89 55 04 1D"),
            ("TO_HDMI0", "89 65 0E 03"),
            ("TO_HDMI1", "89 65 05 0C"),
            ("TO_HDMI2", "89 65 07 0A"),
            ("TO_HDMI3", "89 65 09 08"),
            ("TO_HDMI4", "89 65 0B 06"),
            ("TO_OPS", "89 65 0D 04"),
            ("FREEZE", "89 55 06 1B"),
        ],
    }
}

/// KTC (HoverCam-sourced) panel code table.
///
/// Shares the navigation and source-switching families with AverMedia but
/// uses a different `79 ..` digit row, and adds picture/sound adjustments,
/// `GET_*` status queries, and commands for entering and leaving the
/// controller's built-in Android environment.
pub fn ktc() -> CodeTable {
    CodeTable {
        variant: "KTC",
        entries: &[
            ("POWER_OFF", "69 76 20"),
            ("POWER_ON", "69 53 43"),
            ("ENTER", "69 07 8F"),
            ("MUTE", "69 37 5F"),
            ("1", "79 85 01"),
            ("2", "79 84 02"),
            ("3", "79 83 03"),
            ("4", "79 82 04"),
            ("5", "79 81 05"),
            ("6", "79 80 06"),
            ("7", "79 7F 07"),
            ("8", "79 7E 08"),
            ("9", "79 7D 09"),
            ("0", "79 86 00"),
            ("VOL_UP", "79 41 45"),
            ("VOL_DOWN", "79 42 44"),
            ("CH_UP", "79 10 76"),
            ("CH_DOWN", "79 11 75"),
            ("SOURCE", "69 19 7D"),
            ("MENU", "69 80 16"),
            ("LEFT", "69 63 33"),
            ("RIGHT", "69 66 30"),
            ("DOWN", "69 43 53"),
            ("UP", "69 46 50"),
            ("SCREENSIZE", "79 13 73"),
            ("PICTUREMODE", "79 14 72"),
            ("SOUNDMODE", "79 15 71"),
            ("SLEEPTIMER", "79 16 70"),
            ("BLANK", "79 45 41"),
            ("GET_POWERSTATUS", "79 33 53"),
            ("GET_POWERSAVEMODE", "79 30 56"),
            ("GET_DISPLAYSERIALNUMBER", "79 26 60"),
            ("GET_MUTE", "79 44 42"),
            ("GET_VOLUME", "79 43 43"),
            ("GET_OPSINSTALLED", "79 31 55"),
            ("GET_OPSSTATE", "79 32 54"),
            ("GET_DISPLAYMODE", "79 25 61"),
            ("GET_CONTRAST", "79 21 65"),
            ("GET_BRIGHTNESS", "79 20 66"),
            ("GET_SHARPNESS", "79 22 64"),
            ("GET_COLORTEMP", "79 23 63"),
            ("TO_AV", "89 55 0D 14"),
            ("TO_VGA", "89 65 03 0E"),
            ("TO_YPbPr", "89 55 04 1D"),
            ("TO_HDMI0", "89 65 0E 03"),
            ("TO_HDMI1", "89 65 05 0C"),
            ("TO_HDMI2", "89 65 07 0A"),
            ("TO_HDMI3", "89 65 09 08"),
            ("TO_HDMI4", "89 65 0B 06"),
            ("TO_OPS", "89 65 0D 04"),
            ("FREEZE", "89 55 06 1B"),
            ("TO_ANDROID", "89 65 06 0B"),
            ("EXIT_ANDROID", "89 15 53 0E"),
        ],
    }
}

/// All built-in tables in catalogue order.
pub fn all_tables() -> Vec<CodeTable> {
    vec![avermedia(), ktc()]
}
