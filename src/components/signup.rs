use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth;
use crate::components::Navbar;

const MIN_PASSWORD_LEN: usize = 8;

#[function_component(Signup)]
pub fn signup() -> Html {
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let accept_terms = use_state(|| false);
    let form_error = use_state(String::new);
    let is_loading = use_state(|| false);
    let registration_complete = use_state(|| false);
    let navigator = use_navigator().unwrap();

    let text_input = |target: UseStateHandle<String>| {
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<web_sys::HtmlInputElement>();
            target.set(input.value());
        })
    };

    let on_full_name = text_input(full_name.clone());
    let on_email = text_input(email.clone());
    let on_password = text_input(password.clone());
    let on_confirm = text_input(confirm_password.clone());

    let on_terms = {
        let accept_terms = accept_terms.clone();
        Callback::from(move |event: Event| {
            let input = event.target_unchecked_into::<web_sys::HtmlInputElement>();
            accept_terms.set(input.checked());
        })
    };

    let on_submit = {
        let full_name = full_name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let accept_terms = accept_terms.clone();
        let form_error = form_error.clone();
        let is_loading = is_loading.clone();
        let registration_complete = registration_complete.clone();
        Callback::from(move |_: MouseEvent| {
            form_error.set(String::new());

            if full_name.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty() {
                form_error.set("Please fill in all fields".to_string());
                return;
            }
            if *password != *confirm_password {
                form_error.set("Passwords do not match".to_string());
                return;
            }
            if !*accept_terms {
                form_error.set("Please accept the terms and privacy policy".to_string());
                return;
            }
            if password.len() < MIN_PASSWORD_LEN {
                form_error.set("Password must be at least 8 characters long".to_string());
                return;
            }

            is_loading.set(true);
            let full_name = (*full_name).clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let form_error = form_error.clone();
            let is_loading = is_loading.clone();
            let registration_complete = registration_complete.clone();
            spawn_local(async move {
                match auth::signup(&auth::shared(), &full_name, &email, &password).await {
                    Ok(_) => registration_complete.set(true),
                    Err(err) => form_error.set(err.message().to_string()),
                }
                is_loading.set(false);
            });
        })
    };

    let go_to_chat = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.push(&Route::Chat))
    };

    if *registration_complete {
        return html! {
            <div style="min-height:100vh; background:#151929; color:#e0e6f3; display:flex; align-items:center; justify-content:center;">
                <div style="text-align:center; max-width:420px;">
                    <h1>{ "Welcome to SereNova" }</h1>
                    <p style="color:#8b93ad;">{ "Your account is ready. Your journey to better mental health starts here." }</p>
                    <button onclick={go_to_chat}
                        style="margin-top:1em; padding:0.8em 2em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; font-size:1em; cursor:pointer;">
                        { "Start chatting" }
                    </button>
                </div>
            </div>
        };
    }

    html! {
        <div style="min-height:100vh; background:#151929; color:#e0e6f3;">
            <Navbar />
            <div style="display:flex; align-items:center; justify-content:center; min-height:100vh; padding:2em;">
                <div style="width:100%; max-width:420px;">
                    <h1 style="margin-bottom:0.2em;">{ "Create your account" }</h1>
                    <p style="color:#8b93ad; margin-bottom:1.5em;">{ "Sign up for personalized mental wellness support" }</p>
                    { if !form_error.is_empty() {
                        html! { <div style="border:1px solid #e07878; color:#e07878; padding:0.8em; border-radius:8px; margin-bottom:1em;">{ (*form_error).clone() }</div> }
                    } else {
                        html! {}
                    }}
                    <div style="display:flex; flex-direction:column; gap:1em;">
                        <label style="display:flex; flex-direction:column; gap:0.4em;">
                            { "Full name" }
                            <input type="text" value={(*full_name).clone()} oninput={on_full_name}
                                style="padding:0.8em; border-radius:8px; border:1px solid #2b3150; background:#1d2235; color:#e0e6f3;" />
                        </label>
                        <label style="display:flex; flex-direction:column; gap:0.4em;">
                            { "Email address" }
                            <input type="email" value={(*email).clone()} oninput={on_email}
                                style="padding:0.8em; border-radius:8px; border:1px solid #2b3150; background:#1d2235; color:#e0e6f3;" />
                        </label>
                        <label style="display:flex; flex-direction:column; gap:0.4em;">
                            { "Password" }
                            <input type="password" value={(*password).clone()} oninput={on_password}
                                style="padding:0.8em; border-radius:8px; border:1px solid #2b3150; background:#1d2235; color:#e0e6f3;" />
                        </label>
                        <label style="display:flex; flex-direction:column; gap:0.4em;">
                            { "Confirm password" }
                            <input type="password" value={(*confirm_password).clone()} oninput={on_confirm}
                                style="padding:0.8em; border-radius:8px; border:1px solid #2b3150; background:#1d2235; color:#e0e6f3;" />
                        </label>
                        <label style="display:flex; align-items:center; gap:0.5em; color:#8b93ad;">
                            <input type="checkbox" checked={*accept_terms} onchange={on_terms} />
                            { "I accept the terms and privacy policy" }
                        </label>
                        <button onclick={on_submit} disabled={*is_loading}
                            style="padding:0.8em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; font-size:1em; cursor:pointer;">
                            { if *is_loading { "Creating account..." } else { "Create account" } }
                        </button>
                    </div>
                    <p style="margin-top:1.5em; color:#8b93ad;">
                        { "Already have an account? " }
                        <Link<Route> to={Route::Login}><span style="color:#7c8fe0;">{ "Sign in" }</span></Link<Route>>
                    </p>
                </div>
            </div>
        </div>
    }
}
