use crate::infrastructure::supabase::client::SupabaseClient;

#[derive(Clone)]
pub struct SupabaseProjectRepo {
    pub client: SupabaseClient,
}

#[derive(Clone)]
pub struct SupabaseCertificateRepo {
    pub client: SupabaseClient,
}

#[derive(Clone)]
pub struct SupabaseCommentRepo {
    pub client: SupabaseClient,
}

#[derive(Clone)]
pub struct SupabaseProfileRepo {
    pub client: SupabaseClient,
}

#[derive(Clone)]
pub struct SupabaseStorage {
    pub client: SupabaseClient,
}
