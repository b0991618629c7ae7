//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the seeded status name.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Look up a status by its database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( x if x == $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Look up a status by its seeded name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Procurement application status.
    ApplicationStatus {
        Pending = 1 => "pending",
        Approved = 2 => "approved",
        Rejected = 3 => "rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::procurement::VALID_STATUSES;

    #[test]
    fn test_ids_match_seed_order() {
        assert_eq!(ApplicationStatus::Pending.id(), 1);
        assert_eq!(ApplicationStatus::Approved.id(), 2);
        assert_eq!(ApplicationStatus::Rejected.id(), 3);
    }

    #[test]
    fn test_names_match_core_vocabulary() {
        for (i, name) in VALID_STATUSES.iter().enumerate() {
            let status = ApplicationStatus::from_id(i as StatusId + 1).unwrap();
            assert_eq!(status.name(), *name);
            assert_eq!(ApplicationStatus::from_name(name), Some(status));
        }
        assert_eq!(ApplicationStatus::from_id(9), None);
    }
}
