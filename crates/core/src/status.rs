//! Text-valued status enums shared by the database and API layers.
//!
//! Each enum maps to a `TEXT` column guarded by a `CHECK` constraint in the
//! migrations. The string form is the wire and storage representation, so
//! variants serialize exactly as the column values.

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the stored column value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$( $val ),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Role stored on a profile. Drives which endpoints a user may call.
    UserRole {
        Resident = "resident",
        Admin = "admin",
        Cleaner = "cleaner",
        Security = "security",
    }
}

define_text_enum! {
    /// Guest pass lifecycle. Moves strictly forward.
    GuestStatus {
        Expected = "expected",
        Arrived = "arrived",
        Departed = "departed",
    }
}

define_text_enum! {
    /// Support ticket category.
    ServiceRequestCategory {
        Maintenance = "maintenance",
        Cleaning = "cleaning",
        Security = "security",
    }
}

define_text_enum! {
    /// Support ticket progress.
    ServiceRequestStatus {
        Pending = "pending",
        InProgress = "in_progress",
        Resolved = "resolved",
    }
}

define_text_enum! {
    /// Kind of on-site service a resident can call for.
    ServiceLogKind {
        Garbage = "garbage",
        Repair = "repair",
    }
}

define_text_enum! {
    /// Service log progress.
    ServiceLogStatus {
        Pending = "pending",
        Completed = "completed",
    }
}

define_text_enum! {
    /// Ledger entry category.
    TransactionKind {
        /// Monthly maintenance dues.
        Dues = "dues",
        /// Contribution to the fixtures fund.
        Fixture = "fixture",
        Fine = "fine",
    }
}

define_text_enum! {
    TransactionStatus {
        Paid = "paid",
        Unpaid = "unpaid",
    }
}

define_text_enum! {
    /// Marketplace listing state.
    MarketplaceItemStatus {
        Active = "active",
        Sold = "sold",
    }
}

define_text_enum! {
    AnnouncementPriority {
        Low = "low",
        High = "high",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_status_strings_match_check_constraint() {
        assert_eq!(GuestStatus::Expected.as_str(), "expected");
        assert_eq!(GuestStatus::Arrived.as_str(), "arrived");
        assert_eq!(GuestStatus::Departed.as_str(), "departed");
    }

    #[test]
    fn parse_accepts_every_declared_value() {
        for status in ServiceRequestStatus::ALL {
            let parsed: ServiceRequestStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn parse_rejects_unknown_value_with_choices() {
        let err = "landlord".parse::<UserRole>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid UserRole 'landlord'"));
        assert!(msg.contains("resident, admin, cleaner, security"));
    }

    #[test]
    fn serde_uses_column_values() {
        let json = serde_json::to_string(&ServiceRequestStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let back: ServiceRequestStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(back, ServiceRequestStatus::InProgress);
    }

    #[test]
    fn try_from_string_is_used_for_row_decoding() {
        let status = TransactionStatus::try_from("unpaid".to_string()).unwrap();
        assert_eq!(status, TransactionStatus::Unpaid);
        assert!(TransactionStatus::try_from("overdue".to_string()).is_err());
    }
}
