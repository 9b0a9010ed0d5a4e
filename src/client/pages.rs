use super::{ClientError, LoanApiClient};
use crate::models::{AmountValue, Loan, LoanInput, LoanStatus, MessageResponse};

pub const PASSWORD_MISMATCH: &str = "Password do not match";
pub const FIELDS_REQUIRED: &str = "Please fill out all fields";
pub const CONFIRM_DELETE: &str = "Delete this loan?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Dashboard,
}

/// Where to go after a form action, plus an optional message to show the
/// user before going there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub page: Page,
    pub alert: Option<String>,
}

impl Transition {
    fn to(page: Page) -> Self {
        Self { page, alert: None }
    }

    fn alert(page: Page, message: impl Into<String>) -> Self {
        Self {
            page,
            alert: Some(message.into()),
        }
    }
}

fn log_failure(action: &str, err: &ClientError) {
    tracing::warn!("{} failed: {}", action, err);
}

#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
}

impl LoginPage {
    pub async fn submit(&self, api: &LoanApiClient) -> Transition {
        if self.email.is_empty() || self.password.is_empty() {
            return Transition::alert(Page::Login, FIELDS_REQUIRED);
        }

        match api.login(&self.email, &self.password).await {
            Ok(reply) if reply.message == MessageResponse::LOGIN_SUCCESSFUL => {
                Transition::to(Page::Dashboard)
            }
            Ok(reply) => Transition::alert(Page::Login, reply.message),
            Err(err) => {
                log_failure("Login", &err);
                Transition::to(Page::Login)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterPage {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterPage {
    /// The confirmation is checked here; a mismatch never reaches the server.
    pub async fn submit(&self, api: &LoanApiClient) -> Transition {
        let fields = [&self.name, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|f| f.is_empty()) {
            return Transition::alert(Page::Register, FIELDS_REQUIRED);
        }

        if self.password != self.confirm_password {
            return Transition::alert(Page::Register, PASSWORD_MISMATCH);
        }

        match api.register(&self.name, &self.email, &self.password).await {
            Ok(_) => Transition::to(Page::Login),
            Err(err) => {
                log_failure("Registration", &err);
                Transition::to(Page::Register)
            }
        }
    }
}

/// Whether the loan form creates a new loan or replaces an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanForm {
    pub borrower: String,
    pub amount: String,
    pub status: LoanStatus,
    pub mode: FormMode,
}

impl LoanForm {
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Loan",
            FormMode::Edit(_) => "Update Loan",
        }
    }

    fn is_complete(&self) -> bool {
        !self.borrower.is_empty() && !self.amount.trim().is_empty()
    }

    fn to_input(&self) -> LoanInput {
        LoanInput {
            borrower: Some(self.borrower.clone()),
            amount: Some(AmountValue::Text(self.amount.trim().to_string())),
            status: Some(self.status.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// A required field is empty; nothing was sent.
    Incomplete,
    /// The request failed and was logged; the form is left as it was.
    Failed,
}

/// Loan list plus the create/edit form.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    loans: Vec<Loan>,
    pub form: LoanForm,
}

impl Dashboard {
    /// Opens the dashboard and loads the current loans.
    pub async fn open(api: &LoanApiClient) -> Self {
        let mut dashboard = Self::default();
        dashboard.refresh(api).await;
        dashboard
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Replaces the local list with the server's. On failure the old list
    /// stays.
    pub async fn refresh(&mut self, api: &LoanApiClient) {
        match api.list_loans().await {
            Ok(loans) => self.loans = loans,
            Err(err) => log_failure("Fetching loans", &err),
        }
    }

    pub fn begin_edit(&mut self, loan: &Loan) {
        self.form = LoanForm {
            borrower: loan.borrower.clone(),
            amount: loan.amount.to_string(),
            status: loan.status,
            mode: FormMode::Edit(loan.id.clone()),
        };
    }

    pub fn reset_form(&mut self) {
        self.form = LoanForm::default();
    }

    pub async fn submit(&mut self, api: &LoanApiClient) -> SubmitOutcome {
        if !self.form.is_complete() {
            return SubmitOutcome::Incomplete;
        }

        let input = self.form.to_input();
        let result = match &self.form.mode {
            FormMode::Create => api.create_loan(&input).await.map(|_| ()),
            FormMode::Edit(id) => api.update_loan(id, &input).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.refresh(api).await;
                self.reset_form();
                SubmitOutcome::Saved
            }
            Err(err) => {
                log_failure(self.form.submit_label(), &err);
                SubmitOutcome::Failed
            }
        }
    }

    /// Deletes a loan once `confirm` agrees. Returns whether a request was
    /// sent and succeeded.
    pub async fn delete(
        &mut self,
        api: &LoanApiClient,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> bool {
        if !confirm(CONFIRM_DELETE) {
            return false;
        }

        match api.delete_loan(id).await {
            Ok(_) => {
                self.refresh(api).await;
                true
            }
            Err(err) => {
                log_failure("Deleting loan", &err);
                false
            }
        }
    }

    /// There is no server session; logging out only leaves the page.
    pub fn logout(self) -> Page {
        Page::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn loan(id: &str, amount: f64) -> Loan {
        Loan {
            id: id.to_string(),
            borrower: "Alice".to_string(),
            amount,
            status: LoanStatus::Approved,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_begin_edit_switches_mode_and_copies_fields() {
        let mut dashboard = Dashboard::default();
        dashboard.begin_edit(&loan("abc", 1000.0));

        assert_eq!(dashboard.form.mode, FormMode::Edit("abc".to_string()));
        assert_eq!(dashboard.form.amount, "1000");
        assert_eq!(dashboard.form.status, LoanStatus::Approved);
        assert_eq!(dashboard.form.submit_label(), "Update Loan");
    }

    #[test]
    fn test_reset_form_returns_to_create_defaults() {
        let mut dashboard = Dashboard::default();
        dashboard.begin_edit(&loan("abc", 12.5));
        dashboard.reset_form();

        assert_eq!(dashboard.form, LoanForm::default());
        assert_eq!(dashboard.form.status, LoanStatus::Pending);
        assert_eq!(dashboard.form.submit_label(), "Add Loan");
    }

    #[test]
    fn test_form_sends_amount_as_typed() {
        let form = LoanForm {
            borrower: "Bob".to_string(),
            amount: " 250 ".to_string(),
            ..LoanForm::default()
        };
        let input = form.to_input();
        assert_eq!(input.amount, Some(AmountValue::Text("250".to_string())));
        assert_eq!(input.status.as_deref(), Some("Pending"));
    }

    #[test]
    fn test_logout_goes_to_login() {
        assert_eq!(Dashboard::default().logout(), Page::Login);
    }
}
