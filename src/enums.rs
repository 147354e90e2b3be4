//! Enumerations used on the gateway wire.
//!
//! Every enum is sent and received by its upper-case member name. Lookup by
//! name through `from_name` is case-insensitive and lenient: unknown names
//! yield `None`. Deserialization is strict and rejects unknown names, so a
//! decoded model always holds a valid member.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$doc:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$doc])* $variant, )+
        }

        impl $name {
            /// All members, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The member's wire name.
            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            /// Finds a member by name, ignoring ASCII case.
            pub fn from_name(name: &str) -> Option<$name> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.name().eq_ignore_ascii_case(name))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| format!("unknown {} `{}`", $kind, s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                struct NameVisitor;

                impl<'de> Visitor<'de> for NameVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "a {} name", $kind)
                    }

                    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<$name, E> {
                        $name::from_str(value).map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(NameVisitor)
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status shared by bills, payments and payouts.
    Status, "status" {
        /// Just created
        New => "NEW",
        /// Under manual review
        Moderating => "MODERATING",
        /// Being processed
        Process => "PROCESS",
        /// Paid less than requested
        Underpaid => "UNDERPAID",
        /// Completed
        Success => "SUCCESS",
        /// Paid more than requested
        Overpaid => "OVERPAID",
        /// Failed
        Fail => "FAIL",
        /// Failed with an error
        Error => "ERROR",
        /// Declined
        Declined => "DECLINED",
    }
}

wire_enum! {
    /// How many payments a bill link can receive.
    ///
    /// A `NORMAL` bill accepts a single successful payment, a `MULTI` bill
    /// accepts any number of them.
    BillType, "bill type" {
        /// Single-use bill
        Normal => "NORMAL",
        /// Reusable bill
        Multi => "MULTI",
    }
}

wire_enum! {
    /// Currencies supported by the gateway.
    Currency, "currency" {
        /// US dollar
        Usd => "USD",
        /// Russian rouble
        Rub => "RUB",
        /// Euro
        Eur => "EUR",
    }
}

wire_enum! {
    /// Destination account kinds for regular payouts.
    AccountType, "account type" {
        /// Bank card
        CreditCard => "CREDIT_CARD",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_member() {
        for member in Status::ALL {
            assert_eq!(Status::from_name(member.name()), Some(*member));
        }
        for member in BillType::ALL {
            assert_eq!(BillType::from_name(member.name()), Some(*member));
        }
        for member in Currency::ALL {
            assert_eq!(Currency::from_name(member.name()), Some(*member));
        }
        for member in AccountType::ALL {
            assert_eq!(AccountType::from_name(member.name()), Some(*member));
        }
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Status::from_name("success"), Some(Status::Success));
        assert_eq!(BillType::from_name("Multi"), Some(BillType::Multi));
        assert_eq!(AccountType::from_name("credit_card"), Some(AccountType::CreditCard));
    }

    #[test]
    fn test_from_name_unknown_is_none() {
        assert_eq!(Status::from_name("REFUNDED"), None);
        assert_eq!(Currency::from_name("GBP"), None);
        assert_eq!(AccountType::from_name(""), None);
        assert_eq!(BillType::from_name("NORMAL "), None);
    }

    #[test]
    fn test_serialize_by_name() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(serde_json::to_string(&AccountType::CreditCard).unwrap(), "\"CREDIT_CARD\"");
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        let status: Status = serde_json::from_str("\"DECLINED\"").unwrap();
        assert_eq!(status, Status::Declined);

        let err = serde_json::from_str::<Currency>("\"BTC\"").unwrap_err();
        assert!(err.to_string().contains("unknown currency `BTC`"));
    }
}
