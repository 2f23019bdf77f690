use crate::HttpStatusPolicy;

crate::config_group!({

    /// The maximum number of inputs fetched concurrently by a single concatenation.
    /// A value of 0 means every input is fetched at once.
    ///
    /// The default value is 0.
    ///
    /// Use the environment variable `CATFILES_FETCH_MAX_CONCURRENT_FETCHES` to set this value.
    ref max_concurrent_fetches: usize = 0;

    /// How responses with an HTTP error status are treated: "content" merges the body, "error" fails the fetch.
    ///
    /// The default value is "content".
    ///
    /// Use the environment variable `CATFILES_FETCH_HTTP_ERROR_STATUS_POLICY` to set this value.
    ref http_error_status_policy: HttpStatusPolicy = HttpStatusPolicy::Content;

    /// When true, URLs with a scheme other than http or https are fetched with the plain HTTP transport
    /// instead of being rejected.
    ///
    /// The default value is false.
    ///
    /// Use the environment variable `CATFILES_FETCH_ALLOW_UNSUPPORTED_SCHEMES` to set this value.
    ref allow_unsupported_schemes: bool = false;

    /// The User-Agent header sent with remote requests.
    ///
    /// Use the environment variable `CATFILES_FETCH_USER_AGENT` to set this value.
    ref user_agent: String = concat!("catfiles/", env!("CARGO_PKG_VERSION")).to_string();
});
