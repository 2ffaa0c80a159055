use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use matricula_shared::route::AppRoute;

/// 顶部导航栏
#[component]
pub fn Navigation() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session();

    let on_logout = move |_| {
        logout(&auth);
        router.navigate_to_route(AppRoute::Login, true);
    };

    view! {
        <nav class="navbar bg-base-100 shadow-xl px-4 gap-4">
            <Show
                when=move || session.with(|s| s.is_authenticated())
                fallback=|| view! {
                    <Link to=AppRoute::Login class="btn btn-ghost">"Login"</Link>
                    <Link to=AppRoute::Register class="btn btn-ghost">"Registro"</Link>
                }
            >
                <Link to=AppRoute::Courses class="btn btn-ghost">"Cursos"</Link>
                <Link to=AppRoute::Enrollments class="btn btn-ghost">"Minhas Matrículas"</Link>
                <span class="flex-1 text-right">
                    "Olá, " {move || session.with(|s| s.display_name().to_string())}
                </span>
                <button on:click=on_logout class="btn btn-outline btn-error">"Logout"</button>
            </Show>
        </nav>
    }
}
