use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingStateProps {
    #[prop_or(AttrValue::from("Loading ..."))]
    pub message: AttrValue,
}

#[function_component(LoadingState)]
pub fn loading_state(props: &LoadingStateProps) -> Html {
    html! {
        <Card>
            <CardTitle><p><h1>{format!("⌛️ {}", props.message)}</h1></p></CardTitle>
            <CardBody>
                <div class="flex-center">
                    <Spinner size={SpinnerSize::Custom(String::from("80px"))} aria_label="Loading" />
                </div>
            </CardBody>
        </Card>
    }
}
