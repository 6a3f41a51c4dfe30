use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Subjects taught across the directory.
///
/// This is the closed set of canonical subject values. Raw user tokens
/// ("maths", "phy", "sst", "science") are resolved to members of this enum by
/// the vocabulary tables; nothing outside this enum is ever stored in a
/// filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Subject {
    Maths,
    Physics,
    Chemistry,
    Biology,
    English,
    Bengali,
    Hindi,
    Sanskrit,
    #[strum(serialize = "History & Civics")]
    #[serde(rename = "History & Civics")]
    HistoryCivics,
    Geography,
    #[strum(serialize = "Computer Science")]
    #[serde(rename = "Computer Science")]
    ComputerScience,
    Economics,
    Accountancy,
    #[strum(serialize = "Business Studies")]
    #[serde(rename = "Business Studies")]
    BusinessStudies,
    Commerce,
    Psychology,
    Sociology,
    #[strum(serialize = "Political Science")]
    #[serde(rename = "Political Science")]
    PoliticalScience,
    #[strum(serialize = "CA")]
    #[serde(rename = "CA")]
    Ca,
    #[strum(serialize = "NEET")]
    #[serde(rename = "NEET")]
    Neet,
    #[strum(serialize = "JEE")]
    #[serde(rename = "JEE")]
    Jee,
}

/// Examination boards catered to by teachers in the directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Board {
    #[strum(serialize = "CBSE")]
    #[serde(rename = "CBSE")]
    Cbse,
    #[strum(serialize = "ICSE")]
    #[serde(rename = "ICSE")]
    Icse,
    #[strum(serialize = "ISC")]
    #[serde(rename = "ISC")]
    Isc,
    #[strum(serialize = "WBBSE")]
    #[serde(rename = "WBBSE")]
    Wbbse,
    #[strum(serialize = "WBCHSE")]
    #[serde(rename = "WBCHSE")]
    Wbchse,
    #[strum(serialize = "IB")]
    #[serde(rename = "IB")]
    Ib,
    #[strum(serialize = "IGCSE")]
    #[serde(rename = "IGCSE")]
    Igcse,
}

/// Localities covered by the directory (single city).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Area {
    #[strum(serialize = "Salt Lake")]
    #[serde(rename = "Salt Lake")]
    SaltLake,
    #[strum(serialize = "New Town")]
    #[serde(rename = "New Town")]
    NewTown,
    #[strum(serialize = "Park Street")]
    #[serde(rename = "Park Street")]
    ParkStreet,
    Ballygunge,
    Behala,
    #[strum(serialize = "Dum Dum")]
    #[serde(rename = "Dum Dum")]
    DumDum,
    Garia,
    Howrah,
    Jadavpur,
    Kasba,
    #[strum(serialize = "Lake Town")]
    #[serde(rename = "Lake Town")]
    LakeTown,
    Rajarhat,
    Shyambazar,
    Tollygunge,
}

/// Batch size a teacher takes students in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ClassSize {
    Group,
    Solo,
}

/// Whether lessons happen online or at a physical location.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TeachingMode {
    Online,
    Offline,
}

/// A school class level, 1 through 12.
///
/// Serialized as the bare number ("5") in URLs and JSON; `display_label`
/// gives the human form ("Class 5") used in enrichment display columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClassLevel(u8);

impl ClassLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    /// Construct a class level, rejecting anything outside 1..=12.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Human display form, matching the enrichment display column.
    pub fn display_label(&self) -> String {
        format!("Class {}", self.0)
    }

    /// All valid class levels in ascending order.
    pub fn all() -> impl Iterator<Item = ClassLevel> {
        (Self::MIN..=Self::MAX).map(ClassLevel)
    }
}

impl std::fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for ClassLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ClassLevel::new(value).ok_or_else(|| format!("class level out of range: {}", value))
    }
}

impl From<ClassLevel> for u8 {
    fn from(level: ClassLevel) -> u8 {
        level.0
    }
}

impl std::str::FromStr for ClassLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a class level: {}", s))?;
        ClassLevel::new(n).ok_or_else(|| format!("class level out of range: {}", n))
    }
}
