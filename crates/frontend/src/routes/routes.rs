use crate::dashboards::OverviewDashboard;
use crate::domain::a001_product::ui::list::ProductsListPage;
use crate::domain::a002_purchase::ui::list::PurchasesListPage;
use crate::domain::a003_sale::ui::list::SalesListPage;
use crate::domain::a004_expense::ui::list::ExpensesListPage;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::projections::p900_reports::ui::list::ReportsListPage;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use crate::system::pages::logout::LogoutPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::pages::register::RegisterPage;
use crate::system::settings::ui::list::SettingsPage;
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::path;

/// Guarded part of the app: sidebar + header around the active page.
#[component]
fn DashboardLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell
                left=|| view! { <Sidebar /> }.into_any()
                center=|| view! { <Outlet /> }.into_any()
            />
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/register") view=RegisterPage />
                <Route path=path!("/logout") view=LogoutPage />
                <ParentRoute path=path!("") view=DashboardLayout>
                    <Route path=path!("") view=OverviewDashboard />
                    <Route path=path!("overview") view=OverviewDashboard />
                    <Route path=path!("products") view=ProductsListPage />
                    <Route path=path!("purchases") view=PurchasesListPage />
                    <Route path=path!("sales") view=SalesListPage />
                    <Route path=path!("expenses") view=ExpensesListPage />
                    <Route path=path!("reports") view=ReportsListPage />
                    <Route path=path!("settings") view=SettingsPage />
                    <Route path=path!("users") view=UsersListPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
