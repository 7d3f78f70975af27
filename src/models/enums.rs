use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(AccountType {
    Standard => "standard",
    Professional => "professional",
    Pharmacist => "pharmacist",
});

str_enum!(RiskLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
    Critical => "critical",
});

str_enum!(DoseSlot {
    Morning => "morning",
    Midday => "midday",
    Evening => "evening",
});

str_enum!(Frequency {
    Morning => "morning",
    Midday => "midday",
    Evening => "evening",
    Custom => "custom",
});

str_enum!(NotificationChannel {
    Sms => "sms",
    Whatsapp => "whatsapp",
    Call => "call",
    Push => "push",
});

impl DoseSlot {
    /// Fixed clock hour a slot maps to (08:00, 12:00, 18:00).
    pub fn hour(&self) -> u32 {
        match self {
            DoseSlot::Morning => 8,
            DoseSlot::Midday => 12,
            DoseSlot::Evening => 18,
        }
    }
}

impl From<DoseSlot> for Frequency {
    fn from(slot: DoseSlot) -> Self {
        match slot {
            DoseSlot::Morning => Frequency::Morning,
            DoseSlot::Midday => Frequency::Midday,
            DoseSlot::Evening => Frequency::Evening,
        }
    }
}
