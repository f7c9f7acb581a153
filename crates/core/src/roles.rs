//! Well-known role name constants.
//!
//! User roles must match the CHECK constraint on `users.role`; project
//! member roles match the one on `project_members.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

pub const PROJECT_ROLE_OWNER: &str = "owner";
pub const PROJECT_ROLE_MANAGER: &str = "manager";
pub const PROJECT_ROLE_DEVELOPER: &str = "developer";
pub const PROJECT_ROLE_DESIGNER: &str = "designer";
pub const PROJECT_ROLE_TESTER: &str = "tester";

/// All valid project member roles, for request validation.
pub const PROJECT_ROLES: [&str; 5] = [
    PROJECT_ROLE_OWNER,
    PROJECT_ROLE_MANAGER,
    PROJECT_ROLE_DEVELOPER,
    PROJECT_ROLE_DESIGNER,
    PROJECT_ROLE_TESTER,
];
