//! 课程列表页
//!
//! 筛选输入经防抖后才发请求；过期的响应直接丢弃。

use crate::auth::use_auth;
use crate::web::Delay;
use leptos::prelude::*;
use leptos::task::spawn_local;
use matricula_shared::courses::{
    CourseFilter, CourseSearch, Selection, load_courses, submit_enrollment,
};
use matricula_shared::date::Date;
use matricula_shared::debounce::DebounceTicket;
use matricula_shared::sequence::RequestTag;
use matricula_shared::{Course, messages};
use std::time::Duration;

/// 在 `after` 之后尝试发出票据对应的查询
///
/// 浏览器定时器可能比 `Date.now()` 早到；输入仍是最新时按剩余时间重新安排。
fn arm_settle<F>(search: StoredValue<CourseSearch>, ticket: DebounceTicket, after: Duration, fetch: F)
where
    F: Fn(RequestTag, CourseFilter) + Copy + 'static,
{
    Delay::new(after, move || {
        let now = Date::now_timestamp();
        let settled = search.try_update_value(|s| s.settle(ticket, now)).flatten();
        if let Some((tag, filter)) = settled {
            fetch(tag, filter);
        } else if let Some(rest) = search.try_with_value(|s| s.remaining(ticket, now)).flatten() {
            arm_settle(search, ticket, rest.max(Duration::from_millis(1)), fetch);
        }
    })
    .forget();
}

#[component]
pub fn CoursesPage() -> impl IntoView {
    let auth = use_auth();
    let search = StoredValue::new(CourseSearch::new(auth.config().filter_debounce));

    let filter_name = RwSignal::new(String::new());
    let filter_shift = RwSignal::new(String::new());
    let courses = RwSignal::new(Vec::<Course>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);

    let selection = RwSignal::new(Selection::default());
    let enroll_error = RwSignal::new(Option::<String>::None);
    let enroll_success = RwSignal::new(Option::<String>::None);

    let fetch = move |tag: RequestTag, filter: CourseFilter| {
        loading.set(true);
        load_error.set(None);
        spawn_local(async move {
            let result = load_courses(&auth.api(), &filter).await;
            // 页面已卸载或已有更新的查询
            if !search.try_with_value(|s| s.accept(tag)).unwrap_or(false) {
                return;
            }
            match result {
                Ok(list) => courses.set(list),
                Err(e) => {
                    log::error!("Course list failed: {}", e);
                    load_error.set(Some(e.display_message(messages::COURSES_LOAD_FAILED)));
                }
            }
            loading.set(false);
        });
    };

    // 首次加载不经过防抖
    if let Some((tag, filter)) = search.try_update_value(|s| s.begin(CourseFilter::default())) {
        fetch(tag, filter);
    }

    let on_filter_change = move || {
        let filter = CourseFilter {
            name: filter_name.get_untracked(),
            shift: filter_shift.get_untracked(),
        };
        let Some(ticket) = search.try_update_value(|s| s.edit(filter, Date::now_timestamp())) else {
            return;
        };
        let window = search.with_value(|s| s.debounce_window());
        arm_settle(search, ticket, window, fetch);
    };

    let on_submit = move |_| {
        enroll_error.set(None);
        enroll_success.set(None);
        let chosen = selection.get_untracked();
        let session = auth.session().get_untracked();

        spawn_local(async move {
            match submit_enrollment(&auth.api(), &session, &chosen).await {
                Ok(message) => {
                    enroll_success.set(Some(message));
                    selection.update(Selection::clear);
                }
                Err(e) => {
                    if !e.is_validation() {
                        log::error!("Enrollment failed: {}", e);
                    }
                    enroll_error.set(Some(e.display_message(messages::ENROLL_FAILED)));
                }
            }
        });
    };

    let selected_count = move || selection.with(Selection::len);

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-4">
            <h2 class="text-2xl font-bold">"Cursos Ofertados"</h2>

            <div class="flex gap-2">
                <input
                    type="text"
                    placeholder="Nome do curso"
                    class="input input-bordered"
                    prop:value=filter_name
                    on:input=move |ev| {
                        filter_name.set(event_target_value(&ev));
                        on_filter_change();
                    }
                />
                <input
                    type="text"
                    placeholder="Turno (Ex: Night)"
                    class="input input-bordered"
                    prop:value=filter_shift
                    on:input=move |ev| {
                        filter_shift.set(event_target_value(&ev));
                        on_filter_change();
                    }
                />
            </div>

            <Show when=move || loading.get()>
                <p>"Carregando..."</p>
            </Show>
            {move || load_error.get().map(|msg| view! { <p class="text-error">{msg}</p> })}

            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Selecionar"</th>
                            <th>"Código"</th>
                            <th>"Nome"</th>
                            <th>"Créditos"</th>
                            <th>"Vagas"</th>
                            <th>"Turno"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || courses.get()
                            key=|course| course.code.clone()
                            children=move |course: Course| {
                                let code = course.code.clone();
                                let checked = {
                                    let code = code.clone();
                                    move || selection.with(|s| s.contains(&code))
                                };
                                view! {
                                    <tr>
                                        <td>
                                            <input
                                                type="checkbox"
                                                class="checkbox"
                                                prop:checked=checked
                                                on:change=move |_| selection.update(|s| s.toggle(&code))
                                            />
                                        </td>
                                        <td>{course.code}</td>
                                        <td>{course.name}</td>
                                        <td>{course.credits}</td>
                                        <td>{course.available_seats}</td>
                                        <td>{course.shift.unwrap_or_default()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <div class="flex flex-col items-end gap-2">
                {move || enroll_success.get().map(|msg| view! { <p class="text-success">{msg}</p> })}
                {move || enroll_error.get().map(|msg| view! { <p class="text-error">{msg}</p> })}
                <button
                    class="btn btn-primary"
                    on:click=on_submit
                    disabled=move || selected_count() == 0
                >
                    "Matricular em " {selected_count} " curso(s)"
                </button>
            </div>
        </div>
    }
}
