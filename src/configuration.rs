pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> String;
    fn admin_password(&self) -> String;
    fn database_url(&self) -> Option<String>;
    fn mail_endpoint(&self) -> Option<String>;
    fn mail_token(&self) -> Option<String>;
    fn sender_address(&self) -> String;
    fn admin_address(&self) -> String;
    fn site_owner(&self) -> String;
}
