mod form_state;

use crate::auth::{register, use_auth};
use crate::web::router::{Link, use_router};
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use matricula_shared::messages;
use matricula_shared::route::AppRoute;

/// 带标签的文本输入，绑定到一个表单字段
#[component]
fn Field(
    label: &'static str,
    id: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered"
                required
            />
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let form = FormState::new();

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        // 两次密码不一致时不发请求
        let data = match form.validate() {
            Ok(data) => data,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            if register(&auth, data).await {
                form.reset();
                router.navigate_to_route(AppRoute::Login, true);
            } else {
                set_error_msg.set(Some(messages::REGISTER_FAILED.to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Registro"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <Field label="Nome:" id="name" value=form.name />
                        <Field label="Sobrenome:" id="lastname" value=form.lastname />
                        <Field label="ID do Estudante (RA):" id="student-id" value=form.student_id />
                        <Field label="Email (Login):" id="email" value=form.email />
                        <Field label="Senha:" id="password" kind="password" value=form.password />
                        <Field label="Confirmar Senha:" id="password-confirm" kind="password" value=form.password_confirm />

                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                "Registrar"
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-center mt-4">
                    "Já tem uma conta? "
                    <Link to=AppRoute::Login class="link link-primary">"Faça login"</Link>
                </p>
            </div>
        </div>
    }
}
