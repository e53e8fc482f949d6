use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth;
use crate::components::Navbar;

#[function_component(Login)]
pub fn login() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let form_error = use_state(String::new);
    let is_loading = use_state(|| false);
    let navigator = use_navigator().unwrap();

    let on_email = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<web_sys::HtmlInputElement>();
            email.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            let input = event.target_unchecked_into::<web_sys::HtmlInputElement>();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let form_error = form_error.clone();
        let is_loading = is_loading.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            form_error.set(String::new());
            if email.is_empty() || password.is_empty() {
                form_error.set("Please fill in all fields".to_string());
                return;
            }

            is_loading.set(true);
            let email = (*email).clone();
            let password = (*password).clone();
            let form_error = form_error.clone();
            let is_loading = is_loading.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match auth::login(&auth::shared(), &email, &password).await {
                    Ok(_) => navigator.push(&Route::Chat),
                    Err(err) => form_error.set(err.message().to_string()),
                }
                is_loading.set(false);
            });
        })
    };

    html! {
        <div style="min-height:100vh; background:#151929; color:#e0e6f3;">
            <Navbar />
            <div style="display:flex; align-items:center; justify-content:center; min-height:100vh; padding:2em;">
                <div style="width:100%; max-width:420px;">
                    <h1 style="margin-bottom:0.2em;">{ "Welcome back" }</h1>
                    <p style="color:#8b93ad; margin-bottom:1.5em;">{ "Your personal mental health companion" }</p>
                    { if !form_error.is_empty() {
                        html! { <div style="border:1px solid #e07878; color:#e07878; padding:0.8em; border-radius:8px; margin-bottom:1em;">{ (*form_error).clone() }</div> }
                    } else {
                        html! {}
                    }}
                    <div style="display:flex; flex-direction:column; gap:1em;">
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
                        <button onclick={on_submit} disabled={*is_loading}
                            style="padding:0.8em; border:none; border-radius:8px; background:#7c8fe0; color:#1d2235; font-size:1em; cursor:pointer;">
                            { if *is_loading { "Signing in..." } else { "Sign in" } }
                        </button>
                    </div>
                    <p style="margin-top:1.5em; color:#8b93ad;">
                        { "Don't have an account? " }
                        <Link<Route> to={Route::Signup}><span style="color:#7c8fe0;">{ "Sign up" }</span></Link<Route>>
                    </p>
                </div>
            </div>
        </div>
    }
}
