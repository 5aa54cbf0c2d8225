mod descriptor;
mod registry;

pub use descriptor::{Provider, ProviderCredentials, ProviderDescriptor, TokenSet};
pub use registry::ProviderRegistry;

/// Instagram via Meta's OAuth dialog (Instagram Graph API).
///
/// Meta silently reuses a prior grant unless `auth_type=rerequest` is passed,
/// so every login carries it to guarantee the consent screen appears.
pub const INSTAGRAM: ProviderDescriptor = ProviderDescriptor {
    id: "instagram",
    display_name: "Instagram",
    default_username: "Instagram Account",
    client_id_var: "INSTAGRAM_CLIENT_ID",
    client_secret_var: "INSTAGRAM_CLIENT_SECRET",
    authorize_url: "https://www.facebook.com/v21.0/dialog/oauth",
    token_url: "https://graph.facebook.com/v21.0/oauth/access_token",
    scopes: &[
        "instagram_basic",
        "instagram_content_publish",
        "pages_show_list",
        "business_management",
    ],
    scope_separator: ",",
    extra_auth_params: &[("auth_type", "rerequest")],
};

/// YouTube via Google OAuth 2.0.
///
/// `access_type=offline` + `prompt=consent` are required for Google to issue
/// a refresh token on every grant, not just the first one.
pub const YOUTUBE: ProviderDescriptor = ProviderDescriptor {
    id: "youtube",
    display_name: "YouTube",
    default_username: "YouTube Channel",
    client_id_var: "YOUTUBE_CLIENT_ID",
    client_secret_var: "YOUTUBE_CLIENT_SECRET",
    authorize_url: "https://accounts.google.com/o/oauth2/v2/auth",
    token_url: "https://oauth2.googleapis.com/token",
    scopes: &[
        "https://www.googleapis.com/auth/youtube.upload",
        "https://www.googleapis.com/auth/youtube.readonly",
    ],
    scope_separator: " ",
    extra_auth_params: &[("access_type", "offline"), ("prompt", "consent")],
};

/// All descriptors this build ships.
pub const DEFAULT_PROVIDERS: &[ProviderDescriptor] = &[INSTAGRAM, YOUTUBE];

/// Build a registry with the default platform providers.
pub fn with_defaults() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    for descriptor in DEFAULT_PROVIDERS {
        registry.register(*descriptor);
    }
    registry
}
