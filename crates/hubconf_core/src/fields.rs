//! Fields kept when reading each kind of resource from GitHub.
//!
//! Everything else GitHub returns (urls, timestamps, node ids) is dropped
//! before comparison so that it never shows up as a difference.

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;

/// Resource kinds read from GitHub, each with its fixed set of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMask {
    RepositoryOptions,
    Label,
    Collaborator,
    RepositoryHook,
    /// Enough of a repository hook to find its id.
    RepositoryHookId,
    OrganizationOptions,
    Member,
    Membership,
    Team,
    TeamMember,
    TeamMembership,
    TeamRepository,
    OrganizationHook,
    /// Enough of an organization hook to find its id.
    OrganizationHookId,
    OrganizationRepository,
}

impl FieldMask {
    /// Names of the fields kept for this resource.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            FieldMask::RepositoryOptions => &[
                "name",
                "description",
                "homepage",
                "private",
                "has_issues",
                "has_wiki",
                "has_downloads",
                "allow_rebase_merge",
                "allow_squash_merge",
                "allow_merge_commit",
            ],
            FieldMask::Label => &["name", "color"],
            FieldMask::Collaborator => &["login", "permissions"],
            FieldMask::RepositoryHook => &["name", "events", "active", "config"],
            FieldMask::RepositoryHookId => &["name", "config", "id"],
            FieldMask::OrganizationOptions => &[
                "billing_email",
                "company",
                "email",
                "location",
                "name",
                "description",
            ],
            FieldMask::Member => &["login"],
            FieldMask::Membership => &["role"],
            FieldMask::Team => &["id", "name", "description", "privacy", "permission"],
            FieldMask::TeamMember => &["login"],
            FieldMask::TeamMembership => &["role"],
            FieldMask::TeamRepository => &["permissions", "name"],
            FieldMask::OrganizationHook => &["name", "events", "active"],
            FieldMask::OrganizationHookId => &["name", "id"],
            FieldMask::OrganizationRepository => &["name"],
        }
    }
}
