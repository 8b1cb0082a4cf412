//! Client and server bindings for `roost.v1.Roost`.
//!
//! Written in the exact shape `tonic-build` emits for a single
//! bidirectional-streaming method, so the crate carries no protoc build
//! dependency.

/// Generated-style server for the `roost.v1.Roost` service.
pub mod roost_server {
    #![allow(unused_variables, dead_code, missing_docs, clippy::wildcard_imports)]
    use tonic::codegen::*;

    use super::super::messages::RoostRequest;
    use super::super::messages::RoostResponse;

    /// Trait the coordination node implements to serve the stream.
    #[async_trait]
    pub trait Roost: std::marker::Send + std::marker::Sync + 'static {
        /// Server streaming response type for the Message method.
        type MessageStream: tonic::codegen::tokio_stream::Stream<
                Item = std::result::Result<RoostResponse, tonic::Status>,
            > + std::marker::Send
            + 'static;

        /// One long-lived session per call: requests in, responses and
        /// unsolicited watch events out.
        async fn message(
            &self,
            request: tonic::Request<tonic::Streaming<RoostRequest>>,
        ) -> std::result::Result<tonic::Response<Self::MessageStream>, tonic::Status>;
    }

    #[derive(Debug)]
    pub struct RoostServer<T> {
        inner: Arc<T>,
    }

    impl<T> RoostServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T, B> tonic::codegen::Service<http::Request<B>> for RoostServer<T>
    where
        T: Roost,
        B: Body + std::marker::Send + 'static,
        B::Error: Into<StdError> + std::marker::Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(
            &mut self,
            req: http::Request<B>,
        ) -> Self::Future {
            match req.uri().path() {
                "/roost.v1.Roost/Message" => {
                    struct MessageSvc<T: Roost>(pub Arc<T>);
                    impl<T: Roost> tonic::server::StreamingService<RoostRequest> for MessageSvc<T> {
                        type Response = RoostResponse;
                        type ResponseStream = T::MessageStream;
                        type Future =
                            BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;

                        fn call(
                            &mut self,
                            request: tonic::Request<tonic::Streaming<RoostRequest>>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move { (*inner).message(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = Arc::clone(&self.inner);
                    let fut = async move {
                        let method = MessageSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec);
                        let res = grpc.streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", tonic::Code::Unimplemented as i32)
                        .header("content-type", "application/grpc")
                        .body(empty_body())
                        .unwrap())
                }),
            }
        }
    }

    impl<T> Clone for RoostServer<T> {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<T> tonic::server::NamedService for RoostServer<T> {
        const NAME: &'static str = "roost.v1.Roost";
    }
}

/// Generated-style client for the `roost.v1.Roost` service.
pub mod roost_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::wildcard_imports)]
    use tonic::codegen::*;

    use super::super::messages::RoostRequest;
    use super::super::messages::RoostResponse;

    #[derive(Debug, Clone)]
    pub struct RoostClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl RoostClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> std::result::Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> RoostClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        /// Open the bidirectional session stream.
        pub async fn message(
            &mut self,
            request: impl tonic::IntoStreamingRequest<Message = RoostRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<RoostResponse>>,
            tonic::Status,
        > {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/roost.v1.Roost/Message");
            let mut req = request.into_streaming_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("roost.v1.Roost", "Message"));
            self.inner.streaming(req, path, codec).await
        }
    }
}
