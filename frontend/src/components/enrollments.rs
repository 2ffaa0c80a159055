//! 我的选课页

use crate::auth::use_auth;
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use matricula_shared::enrollments::{CancelOutcome, cancel_enrollment, empty_notice, load_enrollments};
use matricula_shared::{ClientResult, Enrollment, messages};

#[component]
pub fn EnrollmentsPage() -> impl IntoView {
    let auth = use_auth();

    let enrollments = RwSignal::new(Vec::<Enrollment>::new());
    let loading = RwSignal::new(true);
    let message = RwSignal::new(Option::<String>::None);
    let error = RwSignal::new(Option::<String>::None);

    let show = move |result: ClientResult<Vec<Enrollment>>| {
        match result {
            Ok(list) => {
                if let Some(notice) = empty_notice(&list) {
                    message.set(Some(notice.to_string()));
                }
                enrollments.set(list);
            }
            Err(e) => {
                log::error!("Enrollment list failed: {}", e);
                error.set(Some(e.display_message(messages::ENROLLMENTS_LOAD_FAILED)));
            }
        }
        loading.set(false);
    };

    spawn_local(async move {
        show(load_enrollments(&auth.api()).await);
    });

    let on_cancel = move |id: i64| {
        message.set(None);
        error.set(None);
        spawn_local(async move {
            match cancel_enrollment(&auth.api(), id, confirm, || loading.set(true)).await {
                Ok(CancelOutcome::Declined) => {}
                Ok(CancelOutcome::Canceled { message: text, refreshed }) => {
                    message.set(Some(text));
                    show(refreshed);
                }
                Err(e) => {
                    log::error!("Cancel failed: {}", e);
                    error.set(Some(e.display_message(messages::CANCEL_FAILED)));
                }
            }
        });
    };

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-4">
            {move || message.get().map(|msg| view! { <p class="text-success">{msg}</p> })}
            {move || error.get().map(|msg| view! { <p class="text-error">{msg}</p> })}

            <h3 class="text-xl font-bold">"Minhas Matrículas (Semestre Atual)"</h3>

            <Show when=move || loading.get()>
                <p>"Carregando matrículas..."</p>
            </Show>

            <Show when=move || !loading.get() && enrollments.with(|list| !list.is_empty())>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Cód. da Matrícula"</th>
                                <th>"Cód. do Curso"</th>
                                <th>"Nome do Curso"</th>
                                <th>"Créditos"</th>
                                <th>"Status"</th>
                                <th>"Ação"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || enrollments.get()
                                key=|e| (e.id, e.canceled)
                                children=move |enrollment: Enrollment| {
                                    let id = enrollment.id;
                                    let status = enrollment.status_label();
                                    let active = !enrollment.canceled;
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{enrollment.course.code}</td>
                                            <td>{enrollment.course.name}</td>
                                            <td>{enrollment.course.credits}</td>
                                            <td>{status}</td>
                                            <td>
                                                <Show when=move || active>
                                                    <button class="btn btn-error btn-sm" on:click=move |_| on_cancel(id)>
                                                        "Cancelar"
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
