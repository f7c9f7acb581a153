//! Status and priority vocabularies stored as TEXT in the database.
//!
//! Each enum variant's `as_str` form matches the seed CHECK constraints in
//! the corresponding table migration. `parse` is used to validate
//! request-supplied values before they reach a query.

macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants, in CHECK-constraint order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Return the database/wire string.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }

            /// Parse a database/wire string. Returns `None` for unknown values.
            pub fn parse(s: &str) -> Option<$name> {
                match s {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_str_enum! {
    /// Task lifecycle status; drives the kanban board columns.
    TaskStatus {
        Todo = "todo",
        InProgress = "in_progress",
        InReview = "in_review",
        Done = "done",
    }
}

define_str_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Active = "active",
        Completed = "completed",
        Hold = "hold",
        Archived = "archived",
    }
}

define_str_enum! {
    /// Shared task/project priority scale.
    Priority {
        Low = "low",
        Medium = "medium",
        High = "high",
        Urgent = "urgent",
    }
}

define_str_enum! {
    /// User account status.
    UserStatus {
        Active = "active",
        Inactive = "inactive",
    }
}

/// Filter sentinel meaning "do not filter on this field".
pub const FILTER_ALL: &str = "all";

/// Validate a `status`/`priority`-style filter value: the sentinel `"all"`
/// passes through as `None` (no filter); any other value must parse.
pub fn parse_filter<T>(
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    if value == FILTER_ALL {
        return Ok(None);
    }
    parse(value)
        .map(Some)
        .ok_or_else(|| format!("invalid filter value: {value}"))
}
