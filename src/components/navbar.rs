use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::auth;
use crate::components::PlaylistModal;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let authenticated = use_state(|| auth::shared().is_authenticated());
    let show_playlists = use_state(|| false);
    let navigator = use_navigator().unwrap();

    {
        let authenticated = authenticated.clone();
        use_effect_with((), move |_| {
            auth::shared().subscribe(move |authed| authenticated.set(authed));
            || ()
        });
    }

    let open_playlists = {
        let show_playlists = show_playlists.clone();
        Callback::from(move |_| show_playlists.set(true))
    };

    let close_playlists = {
        let show_playlists = show_playlists.clone();
        Callback::from(move |_| show_playlists.set(false))
    };

    let on_logout = {
        let navigator = navigator.clone();
        Callback::from(move |_| {
            let navigator = navigator.clone();
            spawn_local(async move {
                auth::logout(&auth::shared()).await;
                navigator.push(&Route::Home);
            });
        })
    };

    html! {
        <nav style="display:flex; align-items:center; justify-content:space-between; padding:1em 2em; background:#1d2235; color:#e0e6f3; position:fixed; top:0; left:0; right:0; z-index:20;">
            <Link<Route> to={Route::Home}>
                <span style="font-size:1.2em; font-weight:bold; color:#e0e6f3;">{ "SereNova AI" }</span>
            </Link<Route>>
            <div style="display:flex; align-items:center; gap:1em;">
                { if *authenticated {
                    html! {
                        <>
                            <button onclick={open_playlists} style="padding:0.5em 1em; background:#2b3150; color:#e0e6f3; border:none; border-radius:6px; cursor:pointer;">
                                { "Playlists" }
                            </button>
                            <Link<Route> to={Route::Chat}>
                                <span style="color:#e0e6f3;">{ "Chat" }</span>
                            </Link<Route>>
                            <button onclick={on_logout} style="padding:0.5em 1em; background:transparent; color:#e07878; border:1px solid #e07878; border-radius:6px; cursor:pointer;">
                                { "Logout" }
                            </button>
                        </>
                    }
                } else {
                    html! {
                        <>
                            <Link<Route> to={Route::Login}>
                                <span style="color:#e0e6f3;">{ "Login" }</span>
                            </Link<Route>>
                            <Link<Route> to={Route::Signup}>
                                <span style="padding:0.5em 1em; background:#7c8fe0; color:#1d2235; border-radius:6px;">{ "Get Started" }</span>
                            </Link<Route>>
                        </>
                    }
                }}
            </div>
            <PlaylistModal open={*show_playlists} on_close={close_playlists} />
        </nav>
    }
}
