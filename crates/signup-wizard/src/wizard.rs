//! Interactive terminal wizard.
//!
//! One screen per iteration, selected by the store's derived [`Screen`];
//! all state changes go through the flow operations.

use crate::flow;
use anyhow::Result;
use registration_client::RegistrationClient;
use signup_store::{Screen, SignupStore};
use signup_validation::country::CountryCatalog;
use signup_validation::{check_gender, check_otp_method, Step1Draft};
use std::io::{self, Write};

pub struct Wizard {
    store: SignupStore,
    client: RegistrationClient,
    countries: CountryCatalog,
}

impl Wizard {
    pub fn new(store: SignupStore, client: RegistrationClient) -> Self {
        Self {
            store,
            client,
            countries: CountryCatalog::new(),
        }
    }

    pub async fn run(&self) -> Result<()> {
        println!("=== Account Registration ===");

        loop {
            match self.store.screen().await {
                Screen::PersonalInfo => self.personal_info_screen().await?,
                Screen::MethodSelection => self.method_selection_screen().await?,
                Screen::OtpEntry => self.otp_entry_screen().await?,
                Screen::Success => {
                    if !self.success_screen().await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn personal_info_screen(&self) -> Result<()> {
        println!("\n-- Step 1 of 3: personal information --");
        let current = self.store.read(|s| s.data.step1.clone()).await;

        let mut partial = Step1Draft {
            first_name: prompt_field("First name", current.first_name.as_deref())?,
            last_name: prompt_field("Last name", current.last_name.as_deref())?,
            gender: None,
            country: None,
            email: prompt_field("Email", current.email.as_deref())?,
            phone: prompt_field("Phone (E.164, e.g. +14155551234)", current.phone.as_deref())?,
            agreed: None,
        };

        if let Some(raw) = prompt_field(
            "Gender (male/female/other/prefer_not_to_say)",
            current.gender.map(|g| g.as_str()),
        )? {
            match check_gender(Some(&raw)) {
                Ok(gender) => partial.gender = Some(gender),
                Err(message) => println!("  ! {message}"),
            }
        }

        if let Some(code) = prompt_field("Country code (ISO, e.g. US)", current.country.as_deref())? {
            println!("  Selected country: {}", self.countries.name(&code));
            partial.country = Some(code);
        }

        if let Some(answer) = prompt_field("Agree to the terms and conditions? (yes/no)", None)? {
            partial.agreed = Some(answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y"));
        }

        if !flow::submit_personal_info(&self.store, partial).await {
            println!("\nPlease fix the following:");
            let errors = self.store.read(|s| s.ui.errors.clone()).await;
            for (field, message) in errors {
                println!("  {field}: {message}");
            }
        }
        Ok(())
    }

    async fn method_selection_screen(&self) -> Result<()> {
        println!("\n-- Step 2 of 3: verification code delivery --");
        let (email, phone) = self
            .store
            .read(|s| (s.data.step1.email.clone(), s.data.step1.phone.clone()))
            .await;
        println!(
            "  email -> {}\n  phone -> {}",
            email.as_deref().unwrap_or("-"),
            phone.as_deref().unwrap_or("-")
        );

        let Some(raw) = prompt_field("Send the code via (email/phone, or 'back')", None)? else {
            println!("  ! Please select how you'd like to receive your verification code");
            return Ok(());
        };

        if raw.eq_ignore_ascii_case("back") {
            self.store.update(|s| s.prev_step()).await;
            return Ok(());
        }

        let method = match check_otp_method(Some(&raw)) {
            Ok(method) => method,
            Err(message) => {
                println!("  ! {message}");
                return Ok(());
            }
        };

        println!("  Sending verification code...");
        if !flow::request_otp(&self.store, &self.client, method).await {
            self.print_api_error("otp").await;
        }
        Ok(())
    }

    async fn otp_entry_screen(&self) -> Result<()> {
        // The resend gate only moves when ticked
        self.store.update(|s| s.update_can_resend_otp()).await;

        println!("\n-- Step 3 of 3: enter your verification code --");
        if let Some((method, contact)) = self.store.read(|s| s.selected_contact()).await {
            println!("  A 4-digit code was sent via {method} to {contact}");
        }

        let can_resend = self.store.read(|s| s.api.can_resend_otp).await;
        let hint = if can_resend {
            "Code (or 'resend' / 'back')"
        } else {
            "Code (or 'back'; resend available after 60s)"
        };

        let Some(input) = prompt_field(hint, None)? else {
            println!("  ! Verification code is required");
            return Ok(());
        };

        if input.eq_ignore_ascii_case("back") {
            flow::back_to_method_selection(&self.store).await;
            return Ok(());
        }

        if input.eq_ignore_ascii_case("resend") {
            if !can_resend {
                println!("  ! Please wait before requesting another code");
                return Ok(());
            }
            println!("  Resending verification code...");
            if !flow::resend_otp(&self.store, &self.client).await {
                self.print_api_error("otp").await;
            }
            return Ok(());
        }

        println!("  Verifying...");
        if !flow::verify_and_register(&self.store, &self.client, &input).await {
            if let Some(message) = self.store.read(|s| s.ui.errors.get("otpCode").cloned()).await {
                println!("  ! {message}");
            }
            self.print_api_error("verify").await;
        }
        Ok(())
    }

    /// Returns false when the user is done and the wizard should exit.
    async fn success_screen(&self) -> Result<bool> {
        println!("\n=== Registration complete! ===");

        let Some(answer) = prompt_field("Register another account? (yes/no)", None)? else {
            return Ok(false);
        };

        if answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y") {
            self.store.reset().await?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn print_api_error(&self, key: &str) {
        if let Some(message) = self.store.read(|s| s.ui.api_errors.get(key).cloned()).await {
            println!("  ! {message}");
        }
    }
}

/// Prompt for a line of input; empty input yields the shown default, or
/// `None` when there is none.
fn prompt_field(label: &str, default: Option<&str>) -> io::Result<Option<String>> {
    match default {
        Some(value) => print!("{label} [{value}]: "),
        None => print!("{label}: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(default.map(String::from))
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
