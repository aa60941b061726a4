use leptos::*;
use std::rc::Rc;

use crate::core::ethereum::InjectedProvider;
use crate::core::project_actions::unload_projects;
use crate::core::rpc_base::{ChainProvider, RpcConnection, RpcError};
use crate::core::settings::load_settings;
use crate::core::{Dispatch, RootState, Web3Context};
use crate::pages::{ProjectsPage, SettingsPage};
use crate::round::CreateRoundPage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Projects,
    CreateRound,
    Settings,
}

/// Connect the injected wallet and build the context actions run against.
/// Chain reads go through the wallet unless a custom RPC endpoint is saved.
async fn connect_wallet() -> Result<Web3Context, RpcError> {
    let wallet = InjectedProvider;
    let account = wallet.request_account().await?;
    let chain_id = wallet.chain_id().await?;

    let provider: Rc<dyn ChainProvider> = if load_settings().custom_rpc_endpoint().is_some() {
        let connection = RpcConnection::for_chain(chain_id)?;
        log::info!("Reading chain data through {}", connection.endpoint());
        Rc::new(connection)
    } else {
        Rc::new(wallet)
    };

    Web3Context::connect(chain_id, &account, provider)
}

// main app component
#[component]
pub fn App() -> impl IntoView {
    let store = create_rw_signal(RootState::default());
    let web3 = create_rw_signal(None::<Web3Context>);
    let (current_page, set_current_page) = create_signal(Page::Projects);
    let (connecting, set_connecting) = create_signal(false);
    let (error_message, set_error_message) = create_signal(String::new());

    let handle_connect = move |_| {
        if !InjectedProvider::is_installed() {
            set_error_message.set("No browser wallet found. Install one to continue.".to_string());
            return;
        }

        set_connecting.set(true);
        set_error_message.set(String::new());
        spawn_local(async move {
            match connect_wallet().await {
                Ok(ctx) => web3.set(Some(ctx)),
                Err(e) => {
                    log::error!("Failed to connect wallet: {}", e);
                    set_error_message.set(e.to_string());
                }
            }
            set_connecting.set(false);
        });
    };

    let handle_disconnect = move |_| {
        log::info!("Disconnecting wallet...");
        store.dispatch(unload_projects());
        web3.set(None);
        set_current_page.set(Page::Projects);
    };

    let account = move || web3.with(|ctx| ctx.as_ref().map(|c| c.account.clone()));
    let chain_id = create_memo(move |_| web3.with(|ctx| ctx.as_ref().map(|c| c.chain_id)));

    view! {
        <main class="container">
            <div class="top-bar">
                <nav class="menu">
                    <button class="menu-item" on:click=move |_| set_current_page.set(Page::Projects)>"Projects"</button>
                    <button class="menu-item" on:click=move |_| set_current_page.set(Page::CreateRound)>"Create Round"</button>
                    <button class="menu-item" on:click=move |_| set_current_page.set(Page::Settings)>"Settings"</button>
                </nav>
                <div class="wallet-address">
                    {move || match account() {
                        Some(address) => view! {
                            <span class="address-value">{address}</span>
                            <button class="wallet-btn outline" on:click=handle_disconnect>"Disconnect"</button>
                        }.into_view(),
                        None => view! {
                            <button
                                class="wallet-btn"
                                disabled=move || connecting.get()
                                on:click=handle_connect
                            >
                                {move || if connecting.get() { "Connecting..." } else { "Connect Wallet" }}
                            </button>
                        }.into_view(),
                    }}
                </div>
            </div>

            <div class="error-message">{move || error_message.get()}</div>

            {move || match current_page.get() {
                Page::Projects => match web3.get() {
                    Some(ctx) => view! { <ProjectsPage store=store ctx=store_value(ctx)/> }.into_view(),
                    None => view! { <p class="muted">"Connect a wallet to see your projects."</p> }.into_view(),
                },
                Page::CreateRound => view! { <CreateRoundPage/> }.into_view(),
                Page::Settings => match chain_id.get() {
                    Some(id) => view! { <SettingsPage chain_id=id/> }.into_view(),
                    None => view! { <SettingsPage/> }.into_view(),
                },
            }}
        </main>
    }
}
