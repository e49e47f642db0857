/// Importance tier of a resiliency feature.
///
/// The discriminant is the multiplier used by the scoring formula:
/// - `Mandatory` (25): without it the resource will most likely have availability issues.
/// - `ImportantAse` (15): reliability in special situations for isolated environments
///   (multiple zones, regional pairing, ...).
/// - `Important` (5): the same for general resources.
/// - `GoodToHave` (1)
/// - `NotCalculated` (0): listed in the report but excluded from scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    Mandatory = 25,
    ImportantAse = 15,
    Important = 5,
    GoodToHave = 1,
    NotCalculated = 0,
}

impl Weight {
    pub const ALL: [Weight; 5] = [
        Weight::Mandatory,
        Weight::ImportantAse,
        Weight::Important,
        Weight::GoodToHave,
        Weight::NotCalculated,
    ];

    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.ordinal() == ordinal)
    }
}

impl TryFrom<i32> for Weight {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_ordinal(value).ok_or(value)
    }
}

/// Compliance level achieved by a feature.
///
/// `NotImplemented` doubles as the initial state of a feature that has not
/// been evaluated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Grade {
    #[default]
    NotImplemented = 0,
    PartiallyImplemented = 1,
    Implemented = 2,
}

impl Grade {
    pub const ALL: [Grade; 3] = [
        Grade::NotImplemented,
        Grade::PartiallyImplemented,
        Grade::Implemented,
    ];

    pub const LOWEST: Grade = Grade::NotImplemented;
    pub const HIGHEST: Grade = Grade::Implemented;

    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.ordinal() == ordinal)
    }
}

impl TryFrom<i32> for Grade {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_ordinal(value).ok_or(value)
    }
}
