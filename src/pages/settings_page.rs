use leptos::*;

use crate::core::network_config;
use crate::core::settings::{load_settings, save_settings, RpcSelection, UserSettings, DEFAULT_IPFS_GATEWAY};

#[component]
pub fn SettingsPage(
    /// chain of the connected wallet, used to show its default endpoint
    #[prop(optional)] chain_id: Option<u64>,
) -> impl IntoView {
    let stored = load_settings();

    // create signal to store current selection and custom urls
    let (selection, set_selection) = create_signal(stored.rpc_selection.clone());
    let (custom_rpc_url, set_custom_rpc_url) = create_signal(stored.custom_rpc_url.clone());
    let (ipfs_gateway_url, set_ipfs_gateway_url) = create_signal(stored.ipfs_gateway_url.clone());
    let (save_status, set_save_status) = create_signal(String::new());

    let default_rpc_url = chain_id
        .and_then(network_config::chain_config)
        .map(|config| config.rpc_endpoint.to_string())
        .unwrap_or_else(|| "Connect a wallet to see the default".to_string());
    let default_label = format!("Default ({})", default_rpc_url);

    let current_rpc_url = move || {
        match selection.get() {
            RpcSelection::Default => default_rpc_url.clone(),
            RpcSelection::Custom => custom_rpc_url.get(),
        }
    };

    let on_save = move |_| {
        let settings = UserSettings {
            rpc_selection: selection.get_untracked(),
            custom_rpc_url: custom_rpc_url.get_untracked(),
            ipfs_gateway_url: ipfs_gateway_url.get_untracked(),
        };
        match save_settings(&settings) {
            Ok(()) => {
                log::info!("Settings saved");
                set_save_status.set("Saved. Reconnect the wallet to apply.".to_string());
            }
            Err(e) => {
                log::error!("Failed to save settings: {}", e);
                set_save_status.set(e.to_string());
            }
        }
    };

    view! {
        <div class="settings-page">
            <h2>"Settings"</h2>

            <div class="settings-section">
                <h3>"RPC Configuration"</h3>

                <div class="rpc-settings">
                    <div class="radio-option">
                        <input
                            type="radio"
                            id="rpc-default"
                            name="rpc-selection"
                            checked=move || selection.get() == RpcSelection::Default
                            on:change=move |_| set_selection.set(RpcSelection::Default)
                        />
                        <label for="rpc-default">{default_label}</label>
                    </div>

                    <div class="radio-option">
                        <input
                            type="radio"
                            id="rpc-custom"
                            name="rpc-selection"
                            checked=move || selection.get() == RpcSelection::Custom
                            on:change=move |_| set_selection.set(RpcSelection::Custom)
                        />
                        <label for="rpc-custom">"Custom"</label>
                        <input
                            type="text"
                            class="custom-rpc-input"
                            placeholder="Enter custom RPC URL"
                            prop:value=move || custom_rpc_url.get()
                            on:input=move |ev| {
                                set_custom_rpc_url.set(event_target_value(&ev));
                            }
                            disabled=move || selection.get() != RpcSelection::Custom
                        />
                    </div>

                    // show current selected rpc url
                    <div class="current-rpc">
                        <h4>"Current RPC URL:"</h4>
                        <div class="rpc-url">{current_rpc_url}</div>
                    </div>
                </div>
            </div>

            <div class="settings-section">
                <h3>"IPFS Gateway"</h3>
                <input
                    type="text"
                    class="custom-rpc-input"
                    placeholder=DEFAULT_IPFS_GATEWAY
                    prop:value=move || ipfs_gateway_url.get()
                    on:input=move |ev| {
                        set_ipfs_gateway_url.set(event_target_value(&ev));
                    }
                />
            </div>

            <button class="wallet-btn" on:click=on_save>"Save"</button>
            <div class="save-status">{move || save_status.get()}</div>
        </div>
    }
}
