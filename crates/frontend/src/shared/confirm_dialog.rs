use leptos::prelude::*;
use thaw::*;

/// Yes/no confirmation on top of the current dialog
#[component]
pub fn ConfirmDialog(
    /// Visibility, also closed by the dialog itself on mask click
    open: RwSignal<bool>,
    #[prop(into)] message: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    /// Disables both buttons while the confirmed action runs
    #[prop(into, optional)]
    is_loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Confirm"</DialogTitle>
                    <DialogContent>
                        <p class="confirm-dialog__message">{message}</p>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| on_cancel.run(())
                            disabled=is_loading
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_confirm.run(())
                            disabled=is_loading
                        >
                            {move || if is_loading.get() { "Please wait..." } else { "Confirm" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
