use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use staffroll_core::AppError;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
                    AppError::Validation(format!("invalid {} '{value}': {error}", $label))
                })
            }
        }
    };
}

record_id!(
    /// Employee primary key.
    EmployeeId,
    "employee id"
);
record_id!(
    /// Country primary key.
    CountryId,
    "country id"
);
record_id!(
    /// State primary key.
    StateId,
    "state id"
);
record_id!(
    /// City primary key.
    CityId,
    "city id"
);
record_id!(
    /// Department primary key.
    DepartmentId,
    "department id"
);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{CountryId, EmployeeId};

    #[test]
    fn ids_round_trip_through_display() {
        let id = EmployeeId::new();
        let parsed = EmployeeId::from_str(id.to_string().as_str());
        assert_eq!(parsed.ok(), Some(id));
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        let result = CountryId::from_str("not-a-uuid");
        assert!(result.is_err());
    }
}
