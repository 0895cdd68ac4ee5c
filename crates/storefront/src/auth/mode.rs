//! Modes of the shared authentication form.

/// Which variant of the authentication form is active.
///
/// Transitions are triggered by the user only:
///
/// | Current | switch link | forgot link |
/// |---|---|---|
/// | Login | Signup | ForgotPassword |
/// | Signup | Login | ForgotPassword |
/// | ForgotPassword | Signup | ForgotPassword |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormMode {
    #[default]
    Login,
    Signup,
    ForgotPassword,
}

/// What the form shows in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub switch_label: &'static str,
    pub show_name: bool,
    pub show_password: bool,
    pub show_forgot_link: bool,
}

impl FormMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 3] = [Self::Login, Self::Signup, Self::ForgotPassword];

    /// Mode after the switch link is clicked.
    #[must_use]
    pub const fn on_switch(self) -> Self {
        match self {
            Self::Login | Self::ForgotPassword => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    /// Mode after the forgot-password link is clicked.
    #[must_use]
    pub const fn on_forgot(self) -> Self {
        Self::ForgotPassword
    }

    /// Whether submitting in this mode needs a password.
    #[must_use]
    pub const fn needs_password(self) -> bool {
        !matches!(self, Self::ForgotPassword)
    }

    /// Field visibility and labels for this mode.
    #[must_use]
    pub const fn layout(self) -> FormLayout {
        match self {
            Self::Login => FormLayout {
                title: "My Account",
                submit_label: "Login",
                switch_label: "Need an account? Sign Up",
                show_name: false,
                show_password: true,
                show_forgot_link: true,
            },
            Self::Signup => FormLayout {
                title: "Sign Up",
                submit_label: "Sign Up",
                switch_label: "Have an account? Login",
                show_name: true,
                show_password: true,
                show_forgot_link: false,
            },
            Self::ForgotPassword => FormLayout {
                title: "Reset Password",
                submit_label: "Send Reset Link",
                switch_label: "Back to Login",
                show_name: false,
                show_password: false,
                show_forgot_link: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_transitions() {
        assert_eq!(FormMode::Login.on_switch(), FormMode::Signup);
        assert_eq!(FormMode::Signup.on_switch(), FormMode::Login);
        assert_eq!(FormMode::ForgotPassword.on_switch(), FormMode::Signup);
    }

    #[test]
    fn test_forgot_transitions() {
        for mode in FormMode::ALL {
            assert_eq!(mode.on_forgot(), FormMode::ForgotPassword);
        }
    }

    #[test]
    fn test_field_visibility_per_mode() {
        let visibility: Vec<(bool, bool)> = FormMode::ALL
            .iter()
            .map(|mode| (mode.layout().show_name, mode.layout().show_password))
            .collect();
        assert_eq!(
            visibility,
            vec![(false, true), (true, true), (false, false)]
        );
    }

    #[test]
    fn test_password_visibility_matches_need() {
        for mode in FormMode::ALL {
            assert_eq!(mode.layout().show_password, mode.needs_password());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(FormMode::Login.layout().submit_label, "Login");
        assert_eq!(FormMode::Signup.layout().title, "Sign Up");
        assert_eq!(
            FormMode::ForgotPassword.layout().submit_label,
            "Send Reset Link"
        );
    }
}
