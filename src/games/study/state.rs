//! Grandfather's study: data model, no logic.
//!
//! 謎解きの流れ:
//! ランプ → 机 (鍵と手紙) → カレンダー (11月17日) → 額縁の写真 → 金庫に「1117」

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::UnknownObject;

// ── Clues ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClueId {
    Lamp,
    Desk,
    Calendar,
    Painting,
    Clock,
    Rug,
    Bookshelf,
}

impl ClueId {
    pub const ALL: [ClueId; 7] = [
        ClueId::Lamp,
        ClueId::Desk,
        ClueId::Calendar,
        ClueId::Painting,
        ClueId::Clock,
        ClueId::Rug,
        ClueId::Bookshelf,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Total number of clues in the room.
pub const CLUE_COUNT: usize = ClueId::ALL.len();

/// Static catalog entry plus its per-session discovery flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Clue {
    pub id: ClueId,
    pub hint: &'static str,
    pub item: Option<ItemId>,
    pub discovered: bool,
}

fn clue_content(id: ClueId) -> (&'static str, Option<ItemId>) {
    match id {
        ClueId::Lamp => (
            "ランプの下に黄ばんだ紙切れがある...\n「手がかりは机の引き出しにある」",
            None,
        ),
        ClueId::Desk => (
            "机の引き出しから古い鍵と手紙を見つけた！\n\n手紙には「金庫のコードは祖父の誕生日だ。月と日を4桁で入力せよ」と書かれている。",
            Some(ItemId::Key),
        ),
        ClueId::Calendar => (
            "壁掛けカレンダーを見る。11月のページが開かれていて、\n17日に赤い丸がつけられている...",
            None,
        ),
        ClueId::Painting => (
            "額縁には古い写真が飾られている。\n優しそうな老人が写っている。\n\n裏を見ると...\n「1942.11.17 おじいちゃんの誕生日」と書かれている！",
            None,
        ),
        ClueId::Clock => (
            "古い振り子時計。11時17分で止まっている...\nこの時刻には何か意味があるのだろうか？",
            None,
        ),
        ClueId::Rug => (
            "カーペットの下を探る...特に何もないようだ。\nでも、ふと額縁の写真が目に入った。",
            None,
        ),
        ClueId::Bookshelf => (
            "本棚を調べる。「11月の思い出」という日記を見つけた。\n中には祖父との思い出が綴られている...",
            None,
        ),
    }
}

/// The seven clues, indexed by [`ClueId::index`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClueBook {
    clues: [Clue; CLUE_COUNT],
}

impl ClueBook {
    pub fn new() -> Self {
        Self {
            clues: ClueId::ALL.map(|id| {
                let (hint, item) = clue_content(id);
                Clue {
                    id,
                    hint,
                    item,
                    discovered: false,
                }
            }),
        }
    }

    pub fn get(&self, id: ClueId) -> &Clue {
        &self.clues[id.index()]
    }

    pub fn get_mut(&mut self, id: ClueId) -> &mut Clue {
        &mut self.clues[id.index()]
    }

    pub fn is_discovered(&self, id: ClueId) -> bool {
        self.get(id).discovered
    }

    #[cfg(test)]
    pub fn discovered_count(&self) -> usize {
        self.clues.iter().filter(|c| c.discovered).count()
    }

    pub fn reset(&mut self) {
        for clue in &mut self.clues {
            clue.discovered = false;
        }
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Clue> {
        self.clues.iter()
    }
}

// ── Items ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemId {
    Key,
}

impl ItemId {
    pub fn glyph(self) -> &'static str {
        match self {
            ItemId::Key => "🔑",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemId::Key => "古い鍵",
        }
    }
}

// ── Room objects ──────────────────────────────────────────────

/// Everything the player can click in the room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Lamp,
    Desk,
    Calendar,
    Painting,
    Clock,
    Rug,
    Bookshelf,
    Window,
    Chair,
    Safe,
    Door,
}

impl ObjectId {
    /// Display order in the room panel.
    pub const ALL: [ObjectId; 11] = [
        ObjectId::Lamp,
        ObjectId::Desk,
        ObjectId::Calendar,
        ObjectId::Painting,
        ObjectId::Clock,
        ObjectId::Rug,
        ObjectId::Bookshelf,
        ObjectId::Window,
        ObjectId::Chair,
        ObjectId::Safe,
        ObjectId::Door,
    ];

    /// The clue hidden in this object, if any.
    pub fn clue(self) -> Option<ClueId> {
        match self {
            ObjectId::Lamp => Some(ClueId::Lamp),
            ObjectId::Desk => Some(ClueId::Desk),
            ObjectId::Calendar => Some(ClueId::Calendar),
            ObjectId::Painting => Some(ClueId::Painting),
            ObjectId::Clock => Some(ClueId::Clock),
            ObjectId::Rug => Some(ClueId::Rug),
            ObjectId::Bookshelf => Some(ClueId::Bookshelf),
            ObjectId::Window | ObjectId::Chair | ObjectId::Safe | ObjectId::Door => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectId::Lamp => "ランプ",
            ObjectId::Desk => "机",
            ObjectId::Calendar => "カレンダー",
            ObjectId::Painting => "額縁の写真",
            ObjectId::Clock => "振り子時計",
            ObjectId::Rug => "カーペット",
            ObjectId::Bookshelf => "本棚",
            ObjectId::Window => "窓",
            ObjectId::Chair => "椅子",
            ObjectId::Safe => "金庫",
            ObjectId::Door => "ドア",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            ObjectId::Lamp => '1',
            ObjectId::Desk => '2',
            ObjectId::Calendar => '3',
            ObjectId::Painting => '4',
            ObjectId::Clock => '5',
            ObjectId::Rug => '6',
            ObjectId::Bookshelf => '7',
            ObjectId::Window => '8',
            ObjectId::Chair => '9',
            ObjectId::Safe => 's',
            ObjectId::Door => 'd',
        }
    }

    pub fn from_hotkey(ch: char) -> Option<ObjectId> {
        let ch = ch.to_ascii_lowercase();
        ObjectId::ALL.into_iter().find(|o| o.hotkey() == ch)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ObjectId {
    type Err = UnknownObject;

    /// Parse the object type names used by the page markup (`data-type`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lamp" => Ok(ObjectId::Lamp),
            "desk" => Ok(ObjectId::Desk),
            "calendar" => Ok(ObjectId::Calendar),
            "painting" => Ok(ObjectId::Painting),
            "clock" => Ok(ObjectId::Clock),
            "rug" => Ok(ObjectId::Rug),
            "bookshelf" => Ok(ObjectId::Bookshelf),
            "window" => Ok(ObjectId::Window),
            "chair" => Ok(ObjectId::Chair),
            "safe" => Ok(ObjectId::Safe),
            "door" => Ok(ObjectId::Door),
            other => Err(UnknownObject(other.to_string())),
        }
    }
}

// ── Config ────────────────────────────────────────────────────

/// Tunables for one room.
#[derive(Clone, Debug)]
pub struct RoomConfig {
    /// 11月17日 = 祖父の誕生日
    pub safe_code: String,
    /// Number of inventory display slots.
    pub inventory_slots: usize,
    /// Delay between "correct" feedback and the unlock reveal.
    pub reveal_delay_ticks: u32,
    /// Delay between "wrong" feedback and clearing the entered digits.
    pub retry_delay_ticks: u32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            safe_code: "1117".into(),
            inventory_slots: 4,
            reveal_delay_ticks: 10,
            retry_delay_ticks: 10,
        }
    }
}

// ── Session state ─────────────────────────────────────────────

/// Time from session start to escape, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Elapsed {
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub fn from_millis(ms: f64) -> Self {
        let total = if ms > 0.0 { (ms / 1000.0).floor() as u64 } else { 0 };
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    pub fn minutes_text(&self) -> String {
        self.minutes.to_string()
    }

    pub fn seconds_text(&self) -> String {
        self.seconds.to_string()
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}分{}秒", self.minutes, self.seconds)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    pub started: bool,
    pub escaped: bool,
    pub hints_found: usize,
    pub inventory: Vec<ItemId>,
    pub discovered_clues: Vec<ClueId>,
    pub safe_code: String,
    pub start_time: Option<f64>,
    pub door_unlocked: bool,
    pub elapsed: Option<Elapsed>,
}

impl GameState {
    pub fn new(safe_code: &str) -> Self {
        Self {
            started: false,
            escaped: false,
            hints_found: 0,
            inventory: Vec::new(),
            discovered_clues: Vec::new(),
            safe_code: safe_code.to_string(),
            start_time: None,
            door_unlocked: false,
            elapsed: None,
        }
    }

    pub fn has_item(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }
}
