//! Login and registration forms.
//!
//! Both forms own their field values and validate each input as it changes,
//! once the user has touched it. Submitting validates everything again and only
//! hands a complete record to `on_submit`. Service failures come back through the
//! `error` prop and are shown in a dismissible banner; when the error names a
//! field, that input is highlighted as well.

use dioxus::prelude::*;
use store::{
    AuthError, FieldError, FormField, LoginErrors, LoginFields, RegisterErrors, RegisterFields,
};

#[component]
fn ErrorBanner(error: AuthError, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "form-error",
            role: "alert",
            span { "{error.message}" }
            button {
                class: "form-error-close",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}

#[component]
fn FormInput(
    field: FormField,
    label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    value: String,
    error: Option<FieldError>,
    #[props(default)] flagged: bool,
    oninput: EventHandler<String>,
) -> Element {
    let invalid = error.is_some() || flagged;
    let class = if invalid {
        "form-input form-input-invalid"
    } else {
        "form-input"
    };

    rsx! {
        label {
            class: "form-field",
            r#for: field.as_str(),
            span { class: "form-label", "{label}" }
            input {
                id: field.as_str(),
                name: field.as_str(),
                class,
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                value: "{value}",
                aria_invalid: invalid,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(error) = error {
                span { class: "form-hint", "{error}" }
            }
        }
    }
}

fn set_login_error(errors: &mut LoginErrors, field: FormField, error: Option<FieldError>) {
    match field {
        FormField::Email => errors.email = error,
        FormField::Password => errors.password = error,
        FormField::Name | FormField::ConfirmPassword => {}
    }
}

fn set_register_error(errors: &mut RegisterErrors, field: FormField, error: Option<FieldError>) {
    match field {
        FormField::Name => errors.name = error,
        FormField::Email => errors.email = error,
        FormField::Password => errors.password = error,
        FormField::ConfirmPassword => errors.confirm_password = error,
    }
}

#[component]
pub fn LoginForm(
    pending: bool,
    error: Option<AuthError>,
    on_submit: EventHandler<LoginFields>,
    on_dismiss_error: EventHandler<()>,
) -> Element {
    let mut fields = use_signal(LoginFields::default);
    let mut errors = use_signal(LoginErrors::default);

    let mut update = move |field: FormField, value: String| {
        {
            let mut current = fields.write();
            match field {
                FormField::Email => current.email = value,
                FormField::Password => current.password = value,
                FormField::Name | FormField::ConfirmPassword => return,
            }
        }
        let checked = fields.peek().validate_field(field);
        set_login_error(&mut errors.write(), field, checked);
        on_dismiss_error.call(());
    };

    let flagged = error.as_ref().and_then(|e| e.field);

    rsx! {
        form {
            class: "auth-form",
            novalidate: true,
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = fields();
                match current.validate() {
                    Ok(()) => {
                        errors.set(LoginErrors::default());
                        on_submit.call(current);
                    }
                    Err(found) => errors.set(found),
                }
            },

            if let Some(error) = error.clone() {
                ErrorBanner { error, on_dismiss: on_dismiss_error }
            }

            FormInput {
                field: FormField::Email,
                label: "Email",
                input_type: "email",
                placeholder: "you@example.com",
                value: fields().email,
                error: errors().email,
                flagged: flagged == Some(FormField::Email),
                oninput: move |value| update(FormField::Email, value),
            }
            FormInput {
                field: FormField::Password,
                label: "Password",
                input_type: "password",
                value: fields().password,
                error: errors().password,
                flagged: flagged == Some(FormField::Password),
                oninput: move |value| update(FormField::Password, value),
            }

            button {
                class: "button button-primary",
                r#type: "submit",
                disabled: pending,
                if pending { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

#[component]
pub fn RegisterForm(
    pending: bool,
    error: Option<AuthError>,
    on_submit: EventHandler<RegisterFields>,
    on_dismiss_error: EventHandler<()>,
) -> Element {
    let mut fields = use_signal(RegisterFields::default);
    let mut errors = use_signal(RegisterErrors::default);

    let mut update = move |field: FormField, value: String| {
        {
            let mut current = fields.write();
            match field {
                FormField::Name => current.name = value,
                FormField::Email => current.email = value,
                FormField::Password => current.password = value,
                FormField::ConfirmPassword => current.confirm_password = value,
            }
        }
        let current = fields.peek();
        let mut next = errors.write();
        set_register_error(&mut next, field, current.validate_field(field));
        // The confirmation depends on the password too.
        if field == FormField::Password && !current.confirm_password.is_empty() {
            let confirm = current.validate_field(FormField::ConfirmPassword);
            set_register_error(&mut next, FormField::ConfirmPassword, confirm);
        }
        drop(next);
        drop(current);
        on_dismiss_error.call(());
    };

    let flagged = error.as_ref().and_then(|e| e.field);

    rsx! {
        form {
            class: "auth-form",
            novalidate: true,
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = fields();
                match current.validate() {
                    Ok(()) => {
                        errors.set(RegisterErrors::default());
                        on_submit.call(current);
                    }
                    Err(found) => errors.set(found),
                }
            },

            if let Some(error) = error.clone() {
                ErrorBanner { error, on_dismiss: on_dismiss_error }
            }

            FormInput {
                field: FormField::Name,
                label: "Name",
                value: fields().name,
                error: errors().name,
                flagged: flagged == Some(FormField::Name),
                oninput: move |value| update(FormField::Name, value),
            }
            FormInput {
                field: FormField::Email,
                label: "Email",
                input_type: "email",
                placeholder: "you@example.com",
                value: fields().email,
                error: errors().email,
                flagged: flagged == Some(FormField::Email),
                oninput: move |value| update(FormField::Email, value),
            }
            FormInput {
                field: FormField::Password,
                label: "Password",
                input_type: "password",
                value: fields().password,
                error: errors().password,
                flagged: flagged == Some(FormField::Password),
                oninput: move |value| update(FormField::Password, value),
            }
            FormInput {
                field: FormField::ConfirmPassword,
                label: "Confirm password",
                input_type: "password",
                value: fields().confirm_password,
                error: errors().confirm_password,
                flagged: flagged == Some(FormField::ConfirmPassword),
                oninput: move |value| update(FormField::ConfirmPassword, value),
            }

            button {
                class: "button button-primary",
                r#type: "submit",
                disabled: pending,
                if pending { "Creating account..." } else { "Create account" }
            }
        }
    }
}
