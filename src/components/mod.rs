use yew::prelude::*;

use crate::model::Course;
use crate::route::Route;

/// A simple, styled button.
#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    /// Button label text
    pub label: String,
    /// Click handler
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
    /// Tailwind classes; defaults to the indigo primary style
    #[prop_or(PRIMARY_BUTTON.to_string())]
    pub class: String,
    /// Rendered before the label
    #[prop_or_default]
    pub icon: Option<String>,
}

pub const PRIMARY_BUTTON: &str =
    "mt-4 w-full bg-indigo-500 text-white py-2 rounded-md hover:bg-indigo-600 transition duration-200 disabled:opacity-50";
pub const SECONDARY_BUTTON: &str =
    "w-full bg-orange-500 text-white py-2 rounded-md hover:bg-orange-600 transition duration-200 mt-3 flex items-center justify-center";

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    html! {
        <button
            type="button"
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            class={props.class.clone()}
        >
            if let Some(icon) = &props.icon {
                <span class="mr-2">{ icon }</span>
            }
            { &props.label }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct OrderDetailsProps {
    pub course: Course,
}

/// Left column of the checkout page: price and course name.
#[function_component(OrderDetails)]
pub fn order_details(props: &OrderDetailsProps) -> Html {
    html! {
        <div class="w-full md:w-1/2">
            <h1 class="text-xl font-semibold underline">{ "Order Details" }</h1>
            <div class="flex items-center text-center space-x-2 mt-4">
                <h2 class="text-gray-600 text-sm">{ "Total Price" }</h2>
                <p class="text-red-500 font-bold">{ props.course.display_price() }</p>
            </div>
            <div class="flex items-center text-center space-x-2">
                <h1 class="text-gray-600 text-sm">{ "Course name" }</h1>
                <p class="text-red-500 font-bold">{ &props.course.title }</p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    pub message: String,
    /// Follows the Purchases link in-app; a plain link when unset
    #[prop_or_default]
    pub on_navigate: Option<Callback<Route>>,
}

/// Full-page error with a way out to the purchases list.
#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    let onclick = props.on_navigate.clone().map(|navigate| {
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            navigate.emit(Route::Purchases);
        })
    });

    html! {
        <div class="flex justify-center items-center h-screen">
            <div class="bg-red-100 text-red-700 px-6 py-4 rounded-lg">
                <p class="text-lg font-semibold">{ &props.message }</p>
                <a class={SECONDARY_BUTTON} href={Route::Purchases.path()} {onclick}>
                    { "Purchases" }
                </a>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::ServerRenderer;

    #[tokio::test]
    async fn error_panel_links_to_purchases() {
        let html = ServerRenderer::<ErrorPanel>::with_props(|| ErrorPanelProps {
            message: "You have already purchased this course.".into(),
            on_navigate: None,
        })
        .hydratable(false)
        .render()
        .await;

        assert!(html.contains("You have already purchased this course."));
        assert!(html.contains(r#"href="/purchases""#));
    }

    #[tokio::test]
    async fn order_details_show_price_and_title() {
        let html = ServerRenderer::<OrderDetails>::with_props(|| OrderDetailsProps {
            course: Course {
                id: Some("c7".into()),
                title: "Clinical Microbiology".into(),
                price: 1299.0,
                description: None,
            },
        })
        .hydratable(false)
        .render()
        .await;

        assert!(html.contains("$1299"));
        assert!(html.contains("Clinical Microbiology"));
    }
}
