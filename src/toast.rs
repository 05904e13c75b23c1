//! Transient notifications.
//!
//! Wrap the app in [`ToastProvider`] and call [`use_toast`] from any
//! component below it. Success toasts disappear after 2 s, error toasts
//! after 4 s.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

pub const SUCCESS_DURATION_MS: u32 = 2_000;
pub const ERROR_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn duration_ms(self) -> u32 {
        match self {
            ToastKind::Success => SUCCESS_DURATION_MS,
            ToastKind::Error => ERROR_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut list = (*self).clone();
        match action {
            ToastAction::Push(toast) => list.toasts.push(toast),
            ToastAction::Dismiss(id) => list.toasts.retain(|t| t.id != id),
        }
        Rc::new(list)
    }
}

/// Cheap handle for raising toasts. Without a provider, toasts only go to the log.
#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    list: Option<UseReducerHandle<ToastList>>,
    next_id: Rc<Cell<u32>>,
}

impl ToastHandle {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        match kind {
            ToastKind::Success => log::info!("toast: {}", message),
            ToastKind::Error => log::warn!("toast: {}", message),
        }
        let Some(list) = &self.list else {
            return;
        };
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        list.dispatch(ToastAction::Push(Toast { id, kind, message }));

        let list = list.clone();
        Timeout::new(kind.duration_ms(), move || list.dispatch(ToastAction::Dismiss(id))).forget();
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_memo((), |_| Cell::new(0));
    let handle = ToastHandle {
        list: Some(list.clone()),
        next_id,
    };

    html! {
        <ContextProvider<ToastHandle> context={handle}>
            { for props.children.iter() }
            <div class="fixed top-4 inset-x-0 flex flex-col items-center gap-2 z-50 pointer-events-none" role="status" aria-live="polite">
                { for list.toasts.iter().map(view_toast) }
            </div>
        </ContextProvider<ToastHandle>>
    }
}

fn view_toast(toast: &Toast) -> Html {
    let (icon, class) = match toast.kind {
        ToastKind::Success => ("✅", "bg-white text-gray-800 shadow-md rounded-md px-4 py-2"),
        ToastKind::Error => ("❌", "bg-white text-red-700 shadow-md rounded-md px-4 py-2"),
    };
    html! {
        <div key={toast.id} class={class}>
            <span class="mr-2">{ icon }</span>
            { &toast.message }
        </div>
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    use_context::<ToastHandle>().unwrap_or_else(|| ToastHandle {
        list: None,
        next_id: Rc::default(),
    })
}
