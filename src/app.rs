use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::{ChatLayout, HomePage, Login, Signup};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/chat")]
    Chat,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::NotFound => html! { <HomePage /> },
        Route::Chat => html! { <ChatLayout /> },
        Route::Login => html! { <Login /> },
        Route::Signup => html! { <Signup /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    // One-time connectivity probe, logged to the console only.
    use_effect_with((), |_| {
        spawn_local(async move {
            match api::check_health().await {
                Ok(health) => web_sys::console::log_1(
                    &format!("Backend health: {} (database: {})", health.status, health.database)
                        .into(),
                ),
                Err(err) => web_sys::console::warn_1(&format!("Backend unreachable: {err}").into()),
            }
        });
        || ()
    });

    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
