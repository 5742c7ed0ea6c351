//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

use crate::error::CoreError;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
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

            /// Resolve a database status ID, rejecting unknown values.
            pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
                match id {
                    $( $val => Ok(Self::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        concat!("Invalid ", stringify!($name), " id {}"),
                        other
                    ))),
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
    /// Operational status shared by vehicles and radios.
    ResourceStatus {
        Available = 1,
        Maintenance = 2,
        Assigned = 3,
        Inactive = 4,
    }
}

define_status_enum! {
    /// Complaint handling status.
    DenunciaStatus {
        Received = 1,
        InProgress = 2,
        Completed = 3,
        Cancelled = 4,
    }
}

define_status_enum! {
    /// Intake request review status (citizen and worker requests).
    RequestStatus {
        Pending = 1,
        InReview = 2,
        Approved = 3,
        Rejected = 4,
    }
}
