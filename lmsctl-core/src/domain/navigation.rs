//! Navigation destinations reachable from the account flows

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// The user's profile view
    Profile,
    /// Sign-in surface
    SignIn,
    /// Account creation surface
    SignUp,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Profile => "/instructorpage/profile",
            Destination::SignIn => "/signin",
            Destination::SignUp => "/signup",
        }
    }
}
